//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical business areas:
//! - `auth` - Session cookie/JWT, password hashing and OAuth provider configuration
//! - `database` - SQLite connection and pool configuration
//! - `email` - Outbound email provider for reset codes
//! - `environment` - Environment detection and logging configuration
//! - `reset` - Password-reset policy
//! - `server` - HTTP server and CORS configuration

pub mod auth;
pub mod database;
pub mod email;
pub mod environment;
pub mod reset;
pub mod server;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use auth::{
    AuthConfig, HashingConfig, OAuthConfig, OAuthProviderConfig, SessionConfig,
    DEFAULT_SESSION_SECRET,
};
pub use database::DatabaseConfig;
pub use email::{EmailConfig, EmailProvider};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use reset::ResetConfig;
pub use server::{CorsConfig, ServerConfig};

/// Name of the optional configuration file layered by [`AppConfig::load`]
pub const CONFIG_FILE: &str = "folio";

/// Prefix for environment overrides layered by [`AppConfig::load`] (`FOLIO__SERVER__PORT=...`)
pub const ENV_PREFIX: &str = "FOLIO";

/// Errors raised while assembling the application configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The layered sources could not be read or deserialized
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    /// The configuration was read but is not usable
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,

    /// Password-reset policy
    #[serde(default)]
    pub reset: ResetConfig,

    /// Outbound email configuration
    #[serde(default)]
    pub email: EmailConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            reset: ResetConfig::default(),
            email: EmailConfig::default(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            cors: CorsConfig::development(),
            logging: LoggingConfig::for_environment(Environment::Development),
            ..Default::default()
        }
    }

    /// Create configuration for production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig::new("0.0.0.0", 8080),
            auth: AuthConfig {
                session: SessionConfig {
                    secure: true,
                    ..Default::default()
                },
                ..Default::default()
            },
            logging: LoggingConfig::for_environment(Environment::Production),
            ..Default::default()
        }
    }

    /// Load configuration from environment variables
    ///
    /// Reads a `.env` file first when one is present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let environment = Environment::from_env();
        let mut config = match environment {
            Environment::Production => Self::production(),
            Environment::Development | Environment::Staging => Self::development(),
        };
        config.environment = environment;
        config.server = ServerConfig::from_env();
        config.database = DatabaseConfig::from_env();
        config.auth = AuthConfig::from_env(config.auth.session.secure);
        config.reset = ResetConfig::from_env();
        config.email = EmailConfig::from_env();
        config.logging = LoggingConfig::for_environment(environment);
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            config.logging.level = level;
        }
        config
    }

    /// Load configuration by layering, lowest priority first:
    /// environment variables read by [`AppConfig::from_env`], an optional
    /// `folio.toml`, and `FOLIO__SECTION__KEY` overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let base = Self::from_env();
        let defaults = config::Config::try_from(&base)?;

        let config: Self = config::Config::builder()
            .add_source(defaults)
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that are unsafe for the current environment
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.environment.is_production() && self.auth.session.is_using_default_secret() {
            return Err(ConfigError::Invalid(
                "SESSION_SECRET must be set in production".to_string(),
            ));
        }
        for (name, provider) in [
            ("google", &self.auth.oauth.google),
            ("github", &self.auth.oauth.github),
        ] {
            if let Some(provider) = provider {
                if provider.client_id.trim().is_empty() || provider.client_secret.trim().is_empty() {
                    return Err(ConfigError::Invalid(format!(
                        "{} OAuth client id and secret must both be set",
                        name
                    )));
                }
            }
        }
        if self.auth.hashing.cost < HashingConfig::MIN_COST {
            return Err(ConfigError::Invalid(format!(
                "bcrypt cost must be at least {}",
                HashingConfig::MIN_COST
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::development();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_production_rejects_default_secret() {
        let config = AppConfig::production();
        assert!(config.auth.session.is_using_default_secret());
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_low_bcrypt_cost_rejected() {
        let mut config = AppConfig::development();
        config.auth.hashing.cost = 2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_production_session_cookie_is_secure() {
        let config = AppConfig::production();
        assert!(config.auth.session.secure);
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_config_error_messages() {
        let invalid = ConfigError::Invalid("session secret missing".to_string());
        assert_eq!(
            invalid.to_string(),
            "invalid configuration: session secret missing"
        );

        let load: ConfigError = config::ConfigError::Message("bad port".to_string()).into();
        assert!(matches!(load, ConfigError::Load(_)));
        assert!(load.to_string().starts_with("failed to load configuration: "));
        assert!(std::error::Error::source(&load).is_some());
    }

    #[test]
    fn test_oauth_provider_needs_credentials() {
        let mut config = AppConfig::development();
        config.auth.oauth.github = Some(OAuthProviderConfig::github("client", ""));
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.auth.oauth.github = Some(OAuthProviderConfig::github("client", "secret"));
        assert!(config.validate().is_ok());
    }
}
