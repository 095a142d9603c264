//! Domain entities representing core business objects.

pub mod content;
pub mod user;
pub mod verification_token;

// Re-export commonly used types
pub use content::{
    CertificateFields, ContentItem, ContentKind, ContentPayload, ExperienceFields, ProjectFields,
};
pub use user::{PublicUser, Role, User};
pub use verification_token::{VerificationToken, RESET_CODE_LENGTH, RESET_CODE_TTL_MINUTES};
