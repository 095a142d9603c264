//! Shared utilities and common types for the Folio server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Response envelopes and error codes
//! - Identifier and input validation helpers

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, ConfigError, CorsConfig, DatabaseConfig, EmailConfig, EmailProvider,
    Environment, HashingConfig, LogFormat, LoggingConfig, ResetConfig, ServerConfig,
    SessionConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use types::{HealthResponse, HealthStatus, OkResponse};
pub use utils::validation;
