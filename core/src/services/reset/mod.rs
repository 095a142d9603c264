//! Password-reset service module
//!
//! Two phases keyed by the account email:
//! - request: classify the identifier, issue a 6 digit code valid for one
//!   hour and hand it to an [`EmailNotifier`]
//! - verify: match `(email, code)`, consume the token, store the new digest

mod config;
mod service;
mod traits;
mod types;

#[cfg(test)]
pub(crate) mod mock;
#[cfg(test)]
mod tests;

pub use config::ResetPolicy;
pub use service::PasswordResetService;
pub use traits::EmailNotifier;
pub use types::{ResetRequestOutcome, VerifyResetCommand};
