//! Repository interfaces for persistence, implemented by the infrastructure layer.

pub mod content;
pub mod user;
pub mod verification_token;

pub use content::ContentRepository;
pub use user::UserRepository;
pub use verification_token::VerificationTokenRepository;

#[cfg(test)]
pub use content::MockContentRepository;
#[cfg(test)]
pub use user::MockUserRepository;
#[cfg(test)]
pub use verification_token::MockVerificationTokenRepository;
