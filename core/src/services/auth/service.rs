//! Main authentication service implementation

use std::sync::Arc;

use tracing::{debug, info};

use folio_shared::utils::validation::{has_min_chars, is_email, non_blank};

use crate::domain::entities::user::{PublicUser, User};
use crate::domain::value_objects::SessionPrincipal;
use crate::errors::{AuthError, DomainResult, ValidationError};
use crate::repositories::UserRepository;
use crate::services::password::PasswordHasher;

use super::config::AuthServiceConfig;

/// Input for self-registration
#[derive(Debug, Clone, Default)]
pub struct RegisterCommand {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub name: Option<String>,
}

/// Authentication service for credential login and registration
pub struct AuthService<U>
where
    U: UserRepository,
{
    /// Credential store
    user_repository: Arc<U>,
    /// Password hashing
    hasher: PasswordHasher,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<U> AuthService<U>
where
    U: UserRepository,
{
    /// Create a new authentication service
    pub fn new(user_repository: Arc<U>, hasher: PasswordHasher, config: AuthServiceConfig) -> Self {
        Self {
            user_repository,
            hasher,
            config,
        }
    }

    /// Verify a username and password
    ///
    /// An unknown username and a wrong password both fail with
    /// `AuthError::InvalidCredentials`. The unknown-user path still performs
    /// one bcrypt verification so both paths take comparable time.
    ///
    /// # Returns
    ///
    /// * `Ok(SessionPrincipal)` - Credentials are valid
    /// * `Err(DomainError)` - Missing input, invalid credentials or store failure
    pub async fn authenticate(
        &self,
        identifier: &str,
        password: &str,
    ) -> DomainResult<SessionPrincipal> {
        let username = identifier.trim();
        if username.is_empty() {
            return Err(ValidationError::required("identifier").into());
        }
        if password.is_empty() {
            return Err(ValidationError::required("password").into());
        }

        let user = self.user_repository.find_by_username(username).await?;

        let Some(user) = user else {
            self.hasher.verify_dummy(password);
            info!(username = %username, "Login failed");
            return Err(AuthError::InvalidCredentials.into());
        };

        if !self.hasher.verify(password, &user.password_hash) {
            info!(username = %username, "Login failed");
            return Err(AuthError::InvalidCredentials.into());
        }

        info!(username = %user.username, role = %user.role, "User authenticated");
        Ok(SessionPrincipal::from(&user))
    }

    /// Register a new `viewer` account
    ///
    /// # Returns
    ///
    /// * `Ok(PublicUser)` - The created account without its password digest
    /// * `Err(ValidationError)` - A field is missing or too short
    /// * `Err(AuthError::Conflict)` - Username or email already taken
    pub async fn register(&self, command: RegisterCommand) -> DomainResult<PublicUser> {
        let username = command.username.trim().to_string();
        let email = non_blank(command.email.as_deref());
        let name = non_blank(command.name.as_deref());

        self.validate_registration(&username, &command.password, email.as_deref())?;

        if self
            .user_repository
            .exists_by_username_or_email(&username, email.as_deref())
            .await?
        {
            debug!(username = %username, "Registration rejected, account exists");
            return Err(AuthError::Conflict.into());
        }

        let password_hash = self.hasher.hash(&command.password)?;
        let user = User::register(username, email, password_hash, name);

        // A concurrent registration can still win the unique index; the store
        // reports that as `Conflict`.
        let created = self.user_repository.create(user).await?;

        info!(user_id = %created.id, username = %created.username, "User registered");
        Ok(created.public_profile())
    }

    fn validate_registration(
        &self,
        username: &str,
        password: &str,
        email: Option<&str>,
    ) -> Result<(), ValidationError> {
        if username.is_empty() {
            return Err(ValidationError::required("username"));
        }
        if !has_min_chars(username, self.config.min_username_length) {
            return Err(ValidationError::too_short("username", self.config.min_username_length));
        }
        if password.is_empty() {
            return Err(ValidationError::required("password"));
        }
        if !has_min_chars(password, self.config.min_password_length) {
            return Err(ValidationError::too_short("password", self.config.min_password_length));
        }
        if let Some(email) = email {
            if !is_email(email) {
                return Err(ValidationError::InvalidFormat {
                    field: "email".to_string(),
                });
            }
        }
        Ok(())
    }
}
