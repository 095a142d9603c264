//! Types for password-reset results and commands

use chrono::{DateTime, Utc};

/// Result of a reset request
///
/// Both variants are reported to clients as the same success envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetRequestOutcome {
    /// A code was stored for the account email
    ///
    /// Delivery to the notifier happens in the background and does not affect
    /// the outcome.
    CodeIssued {
        /// When the issued code stops being valid
        expires: DateTime<Utc>,
    },
    /// No account matched; nothing was stored
    UnknownIdentifier,
}

/// Input for the verification phase
#[derive(Debug, Clone, Default)]
pub struct VerifyResetCommand {
    pub email: String,
    pub code: String,
    pub new_password: String,
}
