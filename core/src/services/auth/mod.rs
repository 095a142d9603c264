//! Authentication service module
//!
//! Credential verification against the user store and self-registration.
//! Registration always produces a `viewer`; login yields a
//! [`SessionPrincipal`](crate::domain::value_objects::SessionPrincipal).

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use service::{AuthService, RegisterCommand};
