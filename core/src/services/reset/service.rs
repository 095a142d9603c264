//! Password-reset service implementation

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{debug, info, warn};

use folio_shared::utils::validation::{classify_identifier, has_min_chars, IdentifierKind};

use crate::domain::entities::verification_token::VerificationToken;
use crate::errors::{AuthError, DomainResult, ValidationError};
use crate::repositories::{UserRepository, VerificationTokenRepository};
use crate::services::password::PasswordHasher;

use super::config::ResetPolicy;
use super::traits::EmailNotifier;
use super::types::{ResetRequestOutcome, VerifyResetCommand};

/// Orchestrates reset-code issuance and verification
pub struct PasswordResetService<U, T, N>
where
    U: UserRepository,
    T: VerificationTokenRepository,
    N: EmailNotifier + ?Sized,
{
    /// Credential store
    user_repository: Arc<U>,
    /// Reset-code store
    token_repository: Arc<T>,
    /// Outbound email
    notifier: Arc<N>,
    /// Password hashing
    hasher: PasswordHasher,
    /// Reset policy
    policy: ResetPolicy,
}

impl<U, T, N> PasswordResetService<U, T, N>
where
    U: UserRepository,
    T: VerificationTokenRepository,
    N: EmailNotifier + ?Sized + 'static,
{
    /// Create a new password-reset service
    pub fn new(
        user_repository: Arc<U>,
        token_repository: Arc<T>,
        notifier: Arc<N>,
        hasher: PasswordHasher,
        policy: ResetPolicy,
    ) -> Self {
        Self {
            user_repository,
            token_repository,
            notifier,
            hasher,
            policy,
        }
    }

    pub fn policy(&self) -> &ResetPolicy {
        &self.policy
    }

    /// Phase 1: issue a reset code for a username or email
    ///
    /// # Returns
    ///
    /// * `Ok(ResetRequestOutcome)` - Code issued, or identifier unknown under the
    ///   non-revealing policy
    /// * `Err(ValidationError)` - Blank identifier
    /// * `Err(AuthError::UserNotFound)` - Identifier unknown under the revealing policy
    /// * `Err(AuthError::NoEmailOnAccount)` - The account has nowhere to send the code
    pub async fn request_reset(&self, identifier: &str) -> DomainResult<ResetRequestOutcome> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(ValidationError::required("identifier").into());
        }

        let kind = classify_identifier(identifier);
        let user = match kind {
            IdentifierKind::Email => self.user_repository.find_by_email(identifier).await?,
            IdentifierKind::Username => self.user_repository.find_by_username(identifier).await?,
        };

        let Some(user) = user else {
            info!(lookup = ?kind, "Password reset requested for unknown identifier");
            if self.policy.reveal_unknown_identifier {
                return Err(AuthError::UserNotFound.into());
            }
            return Ok(ResetRequestOutcome::UnknownIdentifier);
        };

        let Some(email) = user.email.clone() else {
            info!(user_id = %user.id, "Password reset requested for account without email");
            return Err(AuthError::NoEmailOnAccount.into());
        };

        if self.policy.invalidate_previous_codes {
            let removed = self.token_repository.delete_for_identifier(&email).await?;
            if removed > 0 {
                debug!(user_id = %user.id, removed, "Invalidated outstanding reset codes");
            }
        }

        let token = VerificationToken::issue(email.as_str(), Duration::minutes(self.policy.code_ttl_minutes));
        let token = self.token_repository.create(token).await?;

        // Delivery is detached; the reply never waits on the provider
        let notifier = Arc::clone(&self.notifier);
        let code = token.token.clone();
        let display_name = user.display_name().to_string();
        let user_id = user.id;
        tokio::spawn(async move {
            match notifier.send_reset_code(&email, &code, &display_name).await {
                Ok(message_id) => {
                    info!(user_id = %user_id, message_id = %message_id, "Reset code dispatched");
                }
                Err(e) => {
                    warn!(user_id = %user_id, error = %e, "Reset code delivery failed");
                }
            }
        });

        Ok(ResetRequestOutcome::CodeIssued {
            expires: token.expires,
        })
    }

    /// Phase 2: check a code and replace the password
    ///
    /// The token is consumed and the password stored in one atomic redemption;
    /// when two requests race on the same code only one of them wins it.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Password replaced, code consumed
    /// * `Err(ValidationError)` - Missing field or new password too short
    /// * `Err(AuthError::InvalidCode)` - No token for the exact `(email, code)` pair
    /// * `Err(AuthError::CodeExpired)` - Token found past its expiry; it is deleted
    /// * `Err(AuthError::UserNotFound)` - No account holds the email; the code stays usable
    pub async fn verify_reset(&self, command: VerifyResetCommand) -> DomainResult<()> {
        let email = command.email.trim();
        let code = command.code.trim();

        if code.is_empty() {
            return Err(ValidationError::required("code").into());
        }
        if email.is_empty() {
            return Err(ValidationError::required("email").into());
        }
        if command.new_password.is_empty() {
            return Err(ValidationError::required("newPassword").into());
        }
        if !has_min_chars(&command.new_password, self.policy.min_password_length) {
            return Err(
                ValidationError::too_short("newPassword", self.policy.min_password_length).into(),
            );
        }

        let token = self
            .token_repository
            .find(email, code)
            .await?
            .ok_or(AuthError::InvalidCode)?;

        if token.is_expired_at(Utc::now()) {
            self.token_repository.delete(email, code).await?;
            info!("Expired reset code presented and removed");
            return Err(AuthError::CodeExpired.into());
        }

        let user = self
            .user_repository
            .find_by_email(email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let password_hash = self.hasher.hash(&command.new_password)?;

        if !self
            .token_repository
            .redeem(email, code, user.id, &password_hash)
            .await?
        {
            debug!(user_id = %user.id, "Reset code consumed by a concurrent request");
            return Err(AuthError::InvalidCode.into());
        }

        info!(user_id = %user.id, "Password reset completed");
        Ok(())
    }
}
