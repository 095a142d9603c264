//! Session token service
//!
//! Encodes a [`SessionPrincipal`](crate::domain::value_objects::SessionPrincipal)
//! into a signed HS256 JWT carried by the session cookie, and decodes it back.
//! Sessions are stateless: logout only discards the cookie.

mod config;
mod service;

pub use config::SessionServiceConfig;
pub use service::{SessionClaims, SessionService, SessionToken};
