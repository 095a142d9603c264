//! # Infrastructure Layer
//!
//! Concrete implementations of the ports declared in `folio_core`:
//!
//! - **Database**: SQLite connection pool, schema setup and sqlx repositories
//! - **Email**: reset-code delivery through the Resend HTTP API, or the log
//!   in development
//! - **OAuth**: Google and GitHub authorization-code sign-in over reqwest
//! - **Seed**: idempotent creation of the editor account at startup

// Re-export core error types for convenience
pub use folio_core::errors::{DomainError, DomainResult};

/// Database module - SQLite implementations using SQLx
pub mod database;

/// Email module - reset-code notifiers
pub mod email;

/// OAuth module - identity provider client
pub mod oauth;

/// Seeding of privileged accounts
pub mod seed;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Email delivery error
    #[error("Email service error: {0}")]
    Email(String),

    /// Identity provider error
    #[error("OAuth error: {0}")]
    OAuth(String),
}
