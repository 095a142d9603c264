//! # Folio Core
//!
//! Domain layer for the Folio portfolio backend: entities, repository
//! interfaces, error types and the services behind login, registration,
//! sessions, OAuth sign-in, password reset and content management.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{
    ContentItem, ContentKind, ContentPayload, PublicUser, Role, User, VerificationToken,
};
pub use domain::value_objects::SessionPrincipal;
pub use errors::{AuthError, DomainError, DomainResult, HashError, ValidationError};
pub use repositories::{ContentRepository, UserRepository, VerificationTokenRepository};
pub use services::{
    AuthService, AuthServiceConfig, ContentService, EmailNotifier, OAuthClient, OAuthProvider,
    OAuthService, PasswordHasher, PasswordResetService, RegisterCommand, ResetPolicy,
    ResetRequestOutcome, SessionService, SessionServiceConfig, VerifyResetCommand,
};
