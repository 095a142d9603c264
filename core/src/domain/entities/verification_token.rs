//! Verification token entity used by the password-reset flow.

use chrono::{DateTime, Duration, Utc};
use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Serialize};

/// Number of digits in a reset code
pub const RESET_CODE_LENGTH: usize = 6;

/// Default lifetime of a reset code (1 hour)
pub const RESET_CODE_TTL_MINUTES: i64 = 60;

/// Single-use reset credential keyed by the email it was issued to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationToken {
    /// Email address the code was sent to
    pub identifier: String,

    /// The zero-padded numeric code
    pub token: String,

    /// Absolute expiry; the token is valid only while `now < expires`
    pub expires: DateTime<Utc>,
}

impl VerificationToken {
    /// Issues a fresh token for `identifier` expiring after `ttl`
    pub fn issue(identifier: impl Into<String>, ttl: Duration) -> Self {
        Self {
            identifier: identifier.into(),
            token: Self::generate_code(),
            expires: Utc::now() + ttl,
        }
    }

    /// Issues a token with the default one hour lifetime
    pub fn issue_default(identifier: impl Into<String>) -> Self {
        Self::issue(identifier, Duration::minutes(RESET_CODE_TTL_MINUTES))
    }

    /// Draws a code uniformly from `000000..=999999` using the OS CSPRNG
    pub fn generate_code() -> String {
        let code: u32 = OsRng.gen_range(0..1_000_000);
        format!("{:0width$}", code, width = RESET_CODE_LENGTH)
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}
