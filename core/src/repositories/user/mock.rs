//! Mock implementation of UserRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError};

use super::trait_::UserRepository;

/// Mock user repository for testing
#[derive(Clone)]
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    accounts: Arc<RwLock<HashMap<(String, String), Uuid>>>,
    should_fail: bool,
    fail_password_updates: Arc<AtomicBool>,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            accounts: Arc::new(RwLock::new(HashMap::new())),
            should_fail: false,
            fail_password_updates: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Create a repository whose every call fails with a database error
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::new()
        }
    }

    /// Seed the repository with a user, bypassing uniqueness checks
    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }

    /// Make `update_password` fail with a database error, shared across clones
    pub fn set_fail_password_updates(&self, fail: bool) {
        self.fail_password_updates.store(fail, Ordering::SeqCst);
    }

    fn check_failure(&self) -> Result<(), DomainError> {
        if self.should_fail {
            return Err(DomainError::database("mock user store unavailable"));
        }
        Ok(())
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        self.check_failure()?;
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.check_failure()?;
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.email.as_deref() == Some(email))
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        self.check_failure()?;
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn exists_by_username_or_email(
        &self,
        username: &str,
        email: Option<&str>,
    ) -> Result<bool, DomainError> {
        self.check_failure()?;
        let users = self.users.read().await;
        Ok(users.values().any(|u| {
            u.username == username || (email.is_some() && u.email.as_deref() == email)
        }))
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        self.check_failure()?;
        let mut users = self.users.write().await;

        // Mirror the store's unique indexes
        let duplicate = users.values().any(|u| {
            u.username == user.username || (user.email.is_some() && u.email == user.email)
        });
        if duplicate {
            return Err(AuthError::Conflict.into());
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_oauth_account(
        &self,
        provider: &str,
        subject: &str,
    ) -> Result<Option<User>, DomainError> {
        self.check_failure()?;
        let key = (provider.to_string(), subject.to_string());
        let Some(id) = self.accounts.read().await.get(&key).copied() else {
            return Ok(None);
        };
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn create_with_oauth_account(
        &self,
        user: User,
        provider: &str,
        subject: &str,
    ) -> Result<User, DomainError> {
        self.check_failure()?;
        let key = (provider.to_string(), subject.to_string());
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&key) {
            return Err(AuthError::Conflict.into());
        }
        let created = self.create(user).await?;
        accounts.insert(key, created.id);
        Ok(created)
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<bool, DomainError> {
        self.check_failure()?;
        if self.fail_password_updates.load(Ordering::SeqCst) {
            return Err(DomainError::database("mock password update failed"));
        }
        let mut users = self.users.write().await;
        match users.get_mut(&id) {
            Some(user) => {
                user.set_password_hash(password_hash.to_string());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count(&self) -> Result<u64, DomainError> {
        self.check_failure()?;
        Ok(self.users.read().await.len() as u64)
    }
}
