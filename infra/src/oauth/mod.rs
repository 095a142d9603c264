//! OAuth Module
//!
//! Authorization-code sign-in against Google and GitHub. Implements
//! [`OAuthClient`](folio_core::services::oauth::OAuthClient) over reqwest;
//! providers missing from [`OAuthConfig`](folio_shared::config::OAuthConfig)
//! are reported as unconfigured.

pub mod client;
pub mod profile;

#[cfg(test)]
mod tests;

pub use client::HttpOAuthClient;
pub use profile::{parse_github_emails, parse_identity};
