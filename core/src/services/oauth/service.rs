//! OAuth sign-in service implementation

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::domain::value_objects::SessionPrincipal;
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};
use crate::repositories::UserRepository;
use crate::services::password::PasswordHasher;

use super::traits::OAuthClient;
use super::types::{OAuthIdentity, OAuthProvider, OAuthStart};

/// Shortest username the service will derive
const MIN_USERNAME_LENGTH: usize = 3;

/// Numbered suffixes tried before falling back to a random one
const MAX_USERNAME_SUFFIX: u32 = 20;

/// Links provider identities to local accounts
pub struct OAuthService<U, C>
where
    U: UserRepository,
    C: OAuthClient + ?Sized,
{
    user_repository: Arc<U>,
    client: Arc<C>,
    hasher: PasswordHasher,
}

impl<U, C> OAuthService<U, C>
where
    U: UserRepository,
    C: OAuthClient + ?Sized,
{
    pub fn new(user_repository: Arc<U>, client: Arc<C>, hasher: PasswordHasher) -> Self {
        Self {
            user_repository,
            client,
            hasher,
        }
    }

    /// Start a sign-in with a fresh state value
    ///
    /// # Returns
    ///
    /// * `Ok(OAuthStart)` - Authorization URL carrying the state
    /// * `Err(DomainError::NotFound)` - The provider is not configured
    pub fn begin(&self, provider: OAuthProvider) -> DomainResult<OAuthStart> {
        let state = Uuid::new_v4().simple().to_string();
        let authorize_url = self
            .client
            .authorize_url(provider, &state)
            .ok_or_else(|| DomainError::not_found(format!("{} sign-in", provider)))?;

        Ok(OAuthStart {
            authorize_url,
            state,
        })
    }

    /// Finish a sign-in with the code the provider sent back
    ///
    /// A linked identity signs in as its account. An unseen identity gets a
    /// new `viewer` account unless its email already belongs to someone, in
    /// which case linking is refused rather than taking over that account.
    ///
    /// # Returns
    ///
    /// * `Ok(SessionPrincipal)` - The signed-in account
    /// * `Err(ValidationError)` - Blank code
    /// * `Err(AuthError::OAuthFailed)` - The provider exchange failed
    /// * `Err(AuthError::AccountNotLinked)` - Email owned by an unlinked account
    pub async fn complete(
        &self,
        provider: OAuthProvider,
        code: &str,
    ) -> DomainResult<SessionPrincipal> {
        let code = code.trim();
        if code.is_empty() {
            return Err(ValidationError::required("code").into());
        }

        let identity = self
            .client
            .fetch_identity(provider, code)
            .await
            .map_err(|e| {
                warn!(provider = %provider, error = %e, "OAuth code exchange failed");
                AuthError::OAuthFailed {
                    provider: provider.to_string(),
                }
            })?;

        if let Some(user) = self
            .user_repository
            .find_by_oauth_account(provider.as_str(), &identity.subject)
            .await?
        {
            info!(provider = %provider, username = %user.username, "OAuth sign-in");
            return Ok(SessionPrincipal::from(&user));
        }

        if let Some(email) = identity.email.as_deref() {
            if self.user_repository.find_by_email(email).await?.is_some() {
                info!(provider = %provider, "OAuth email belongs to an unlinked account");
                return Err(AuthError::AccountNotLinked.into());
            }
        }

        let username = self.available_username(&identity).await?;
        // Password login stays closed until the owner runs a reset
        let password_hash = self.hasher.hash(&Uuid::new_v4().to_string())?;
        let user = User::register(
            username,
            identity.email.clone(),
            password_hash,
            identity.name.clone(),
        );

        let created = self
            .user_repository
            .create_with_oauth_account(user, provider.as_str(), &identity.subject)
            .await?;

        info!(
            provider = %provider,
            user_id = %created.id,
            username = %created.username,
            "Account created from OAuth sign-in"
        );
        Ok(SessionPrincipal::from(&created))
    }

    async fn available_username(&self, identity: &OAuthIdentity) -> DomainResult<String> {
        let base = username_base(identity);
        if self.user_repository.find_by_username(&base).await?.is_none() {
            return Ok(base);
        }
        for suffix in 2..=MAX_USERNAME_SUFFIX {
            let candidate = format!("{}-{}", base, suffix);
            if self.user_repository.find_by_username(&candidate).await?.is_none() {
                return Ok(candidate);
            }
        }
        Ok(format!("{}-{}", base, &Uuid::new_v4().simple().to_string()[..8]))
    }
}

/// Local username derived from a provider identity
///
/// Prefers the provider login, then the email local part, keeping only
/// lowercase alphanumerics and `-_.`. Falls back to `{provider}-{subject}`.
pub fn username_base(identity: &OAuthIdentity) -> String {
    let email_local = identity
        .email
        .as_deref()
        .and_then(|email| email.split('@').next());

    [identity.username_hint.as_deref(), email_local]
        .into_iter()
        .flatten()
        .map(|raw| {
            raw.chars()
                .filter(|c| c.is_ascii_alphanumeric() || matches!(*c, '-' | '_' | '.'))
                .collect::<String>()
                .to_lowercase()
        })
        .find(|candidate| candidate.chars().count() >= MIN_USERNAME_LENGTH)
        .unwrap_or_else(|| format!("{}-{}", identity.provider, identity.subject))
}
