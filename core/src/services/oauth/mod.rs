//! OAuth sign-in service module
//!
//! Google and GitHub sign-in through the authorization-code flow. The
//! provider round trip sits behind [`OAuthClient`]; the service links the
//! returned identity to a local account and yields the same
//! [`SessionPrincipal`](crate::domain::value_objects::SessionPrincipal) a
//! password login does. First-time sign-ins create a `viewer` account.

mod service;
mod traits;
mod types;

#[cfg(test)]
pub(crate) mod mock;
#[cfg(test)]
mod tests;

pub use service::{username_base, OAuthService};
pub use traits::OAuthClient;
pub use types::{OAuthIdentity, OAuthProvider, OAuthStart};
