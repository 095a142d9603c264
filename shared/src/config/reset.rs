//! Password-reset policy

use serde::{Deserialize, Serialize};

/// Password-reset policy configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResetConfig {
    /// Report unknown identifiers and accounts without email to the caller.
    /// When false every well-formed request answers with the same success.
    #[serde(default)]
    pub reveal_unknown_identifier: bool,

    /// Delete outstanding codes for the same email before storing a new one
    #[serde(default = "default_invalidate_previous")]
    pub invalidate_previous_codes: bool,

    /// Code lifetime in minutes
    #[serde(default = "default_code_ttl_minutes")]
    pub code_ttl_minutes: i64,

    /// Minimum length for a new password
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,
}

impl Default for ResetConfig {
    fn default() -> Self {
        Self {
            reveal_unknown_identifier: false,
            invalidate_previous_codes: default_invalidate_previous(),
            code_ttl_minutes: default_code_ttl_minutes(),
            min_password_length: default_min_password_length(),
        }
    }
}

impl ResetConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            reveal_unknown_identifier: env_bool("RESET_REVEAL_UNKNOWN")
                .unwrap_or(defaults.reveal_unknown_identifier),
            invalidate_previous_codes: env_bool("RESET_INVALIDATE_PREVIOUS")
                .unwrap_or(defaults.invalidate_previous_codes),
            code_ttl_minutes: std::env::var("RESET_CODE_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.code_ttl_minutes),
            min_password_length: defaults.min_password_length,
        }
    }
}

fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key).ok().and_then(|v| match v.to_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    })
}

fn default_invalidate_previous() -> bool {
    true
}

fn default_code_ttl_minutes() -> i64 {
    60
}

fn default_min_password_length() -> usize {
    6
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_defaults() {
        let config = ResetConfig::default();
        assert!(!config.reveal_unknown_identifier);
        assert!(config.invalidate_previous_codes);
        assert_eq!(config.code_ttl_minutes, 60);
        assert_eq!(config.min_password_length, 6);
    }
}
