//! Verification token repository trait for the reset-code store.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::verification_token::VerificationToken;
use crate::errors::DomainError;

/// Repository trait for reset-code persistence
///
/// Several tokens may exist for the same identifier; lookups always match on
/// the exact `(identifier, token)` pair.
#[async_trait]
pub trait VerificationTokenRepository: Send + Sync {
    /// Store a newly issued token
    async fn create(&self, token: VerificationToken) -> Result<VerificationToken, DomainError>;

    /// Find the token matching both identifier and code
    async fn find(&self, identifier: &str, token: &str)
        -> Result<Option<VerificationToken>, DomainError>;

    /// Delete the token matching both identifier and code
    ///
    /// # Returns
    /// * `Ok(true)` - This call removed the token
    /// * `Ok(false)` - No such token (already consumed or never issued)
    async fn delete(&self, identifier: &str, token: &str) -> Result<bool, DomainError>;

    /// Consume the token and store the user's new password hash atomically
    ///
    /// # Returns
    /// * `Ok(true)` - The token was consumed and the password updated
    /// * `Ok(false)` - No such token; nothing was changed
    /// * `Err(AuthError::UserNotFound)` - The user is gone; the token is kept
    async fn redeem(
        &self,
        identifier: &str,
        token: &str,
        user_id: Uuid,
        password_hash: &str,
    ) -> Result<bool, DomainError>;

    /// Delete every outstanding token for an identifier, returning how many were removed
    async fn delete_for_identifier(&self, identifier: &str) -> Result<u64, DomainError>;

    /// Count outstanding tokens for an identifier
    async fn count_for_identifier(&self, identifier: &str) -> Result<u64, DomainError>;
}
