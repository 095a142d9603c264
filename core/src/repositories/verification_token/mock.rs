//! Mock implementation of VerificationTokenRepository for testing

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::entities::verification_token::VerificationToken;
use crate::errors::{AuthError, DomainError};
use crate::repositories::user::{MockUserRepository, UserRepository};

use super::trait_::VerificationTokenRepository;

/// In-memory token store
///
/// When linked to a [`MockUserRepository`], `redeem` updates the password
/// there before removing the token, holding the token lock throughout.
#[derive(Clone, Default)]
pub struct MockVerificationTokenRepository {
    tokens: Arc<Mutex<Vec<VerificationToken>>>,
    users: Option<MockUserRepository>,
}

impl MockVerificationTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A token store whose redemptions write through to `users`
    pub fn with_users(users: MockUserRepository) -> Self {
        Self {
            users: Some(users),
            ..Self::default()
        }
    }

    /// Snapshot of every stored token
    pub async fn all(&self) -> Vec<VerificationToken> {
        self.tokens.lock().await.clone()
    }

    /// Overwrite the expiry of stored tokens, used to simulate the passage of time
    pub async fn set_expiry(&self, identifier: &str, expires: chrono::DateTime<chrono::Utc>) {
        let mut tokens = self.tokens.lock().await;
        for token in tokens.iter_mut().filter(|t| t.identifier == identifier) {
            token.expires = expires;
        }
    }
}

#[async_trait]
impl VerificationTokenRepository for MockVerificationTokenRepository {
    async fn create(&self, token: VerificationToken) -> Result<VerificationToken, DomainError> {
        self.tokens.lock().await.push(token.clone());
        Ok(token)
    }

    async fn find(
        &self,
        identifier: &str,
        token: &str,
    ) -> Result<Option<VerificationToken>, DomainError> {
        let tokens = self.tokens.lock().await;
        Ok(tokens
            .iter()
            .find(|t| t.identifier == identifier && t.token == token)
            .cloned())
    }

    async fn delete(&self, identifier: &str, token: &str) -> Result<bool, DomainError> {
        let mut tokens = self.tokens.lock().await;
        let before = tokens.len();
        tokens.retain(|t| !(t.identifier == identifier && t.token == token));
        Ok(tokens.len() < before)
    }

    async fn redeem(
        &self,
        identifier: &str,
        token: &str,
        user_id: Uuid,
        password_hash: &str,
    ) -> Result<bool, DomainError> {
        let mut tokens = self.tokens.lock().await;
        let matches = |t: &VerificationToken| t.identifier == identifier && t.token == token;
        if !tokens.iter().any(matches) {
            return Ok(false);
        }

        if let Some(users) = &self.users {
            if !users.update_password(user_id, password_hash).await? {
                return Err(AuthError::UserNotFound.into());
            }
        }

        tokens.retain(|t| !matches(t));
        Ok(true)
    }

    async fn delete_for_identifier(&self, identifier: &str) -> Result<u64, DomainError> {
        let mut tokens = self.tokens.lock().await;
        let before = tokens.len();
        tokens.retain(|t| t.identifier != identifier);
        Ok((before - tokens.len()) as u64)
    }

    async fn count_for_identifier(&self, identifier: &str) -> Result<u64, DomainError> {
        let tokens = self.tokens.lock().await;
        Ok(tokens.iter().filter(|t| t.identifier == identifier).count() as u64)
    }
}
