//! Business services containing domain logic and use cases.

pub mod auth;
pub mod authorization;
pub mod content;
pub mod oauth;
pub mod password;
pub mod reset;
pub mod session;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use auth::{AuthService, AuthServiceConfig, RegisterCommand};
pub use authorization::require_editor;
pub use content::ContentService;
pub use oauth::{OAuthClient, OAuthIdentity, OAuthProvider, OAuthService, OAuthStart};
pub use password::PasswordHasher;
pub use reset::{
    EmailNotifier, PasswordResetService, ResetPolicy, ResetRequestOutcome, VerifyResetCommand,
};
pub use session::{SessionClaims, SessionService, SessionServiceConfig, SessionToken};
