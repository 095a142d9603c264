//! Configuration for the session service

use folio_shared::config::SessionConfig;

/// Configuration for the session service
#[derive(Debug, Clone)]
pub struct SessionServiceConfig {
    /// HS256 signing secret
    pub secret: String,
    /// Session lifetime in seconds
    pub ttl_seconds: i64,
    /// Issuer claim written and required on decode
    pub issuer: String,
}

impl Default for SessionServiceConfig {
    fn default() -> Self {
        Self::from(&SessionConfig::default())
    }
}

impl From<&SessionConfig> for SessionServiceConfig {
    fn from(config: &SessionConfig) -> Self {
        Self {
            secret: config.secret.clone(),
            ttl_seconds: config.ttl_seconds,
            issuer: config.issuer.clone(),
        }
    }
}
