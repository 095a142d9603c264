//! SQLite implementations of the `folio_core` repository traits.

mod content_repository_impl;
mod user_repository_impl;
mod verification_token_repository_impl;

pub use content_repository_impl::SqliteContentRepository;
pub use user_repository_impl::SqliteUserRepository;
pub use verification_token_repository_impl::SqliteVerificationTokenRepository;

use folio_core::errors::DomainError;
use uuid::Uuid;

fn parse_uuid(value: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(value).map_err(|e| DomainError::database(format!("Invalid UUID: {}", e)))
}
