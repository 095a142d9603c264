//! Policy knobs for the password-reset flow

use folio_shared::config::ResetConfig;

use crate::domain::entities::verification_token::RESET_CODE_TTL_MINUTES;

/// Password-reset policy
#[derive(Debug, Clone)]
pub struct ResetPolicy {
    /// Report unknown identifiers as `UserNotFound` instead of answering success
    pub reveal_unknown_identifier: bool,
    /// Delete outstanding codes for the email before issuing a new one
    pub invalidate_previous_codes: bool,
    /// Code lifetime in minutes
    pub code_ttl_minutes: i64,
    /// Minimum length of the new password
    pub min_password_length: usize,
}

impl Default for ResetPolicy {
    fn default() -> Self {
        Self {
            reveal_unknown_identifier: false,
            invalidate_previous_codes: true,
            code_ttl_minutes: RESET_CODE_TTL_MINUTES,
            min_password_length: 6,
        }
    }
}

impl From<&ResetConfig> for ResetPolicy {
    fn from(config: &ResetConfig) -> Self {
        Self {
            reveal_unknown_identifier: config.reveal_unknown_identifier,
            invalidate_previous_codes: config.invalidate_previous_codes,
            code_ttl_minutes: config.code_ttl_minutes,
            min_password_length: config.min_password_length,
        }
    }
}
