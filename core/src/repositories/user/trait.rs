//! User repository trait defining the interface for the credential store.
//!
//! Implementations must enforce uniqueness of `username` and of `email`
//! when present, and report a lost uniqueness race as
//! [`AuthError::Conflict`](crate::errors::AuthError::Conflict).

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by exact username
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with that username
    /// * `Err(DomainError)` - Store error
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by exact email address
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by their unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Check whether a user exists with the given username, or with the
    /// given email when one is provided
    async fn exists_by_username_or_email(
        &self,
        username: &str,
        email: Option<&str>,
    ) -> Result<bool, DomainError>;

    /// Insert a new user
    ///
    /// # Returns
    /// * `Ok(User)` - The stored user
    /// * `Err(DomainError::Auth(AuthError::Conflict))` - Username or email already taken
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Find the user linked to an external sign-in identity
    async fn find_by_oauth_account(
        &self,
        provider: &str,
        subject: &str,
    ) -> Result<Option<User>, DomainError>;

    /// Insert a new user and link it to an external identity in one step
    ///
    /// # Returns
    /// * `Ok(User)` - The stored user
    /// * `Err(DomainError::Auth(AuthError::Conflict))` - Username, email or identity already taken
    async fn create_with_oauth_account(
        &self,
        user: User,
        provider: &str,
        subject: &str,
    ) -> Result<User, DomainError>;

    /// Replace the password digest of a user
    ///
    /// # Returns
    /// * `Ok(true)` - Digest updated
    /// * `Ok(false)` - No user with that id
    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<bool, DomainError>;

    /// Count all users
    async fn count(&self) -> Result<u64, DomainError>;
}
