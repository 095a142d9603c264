//! Database module - SQLite implementations using SQLx
//!
//! - Connection pool management
//! - Schema creation at startup
//! - Repository implementations of the `folio_core` traits

pub mod connection;
pub mod schema;
pub mod sqlite;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use sqlite::{SqliteContentRepository, SqliteUserRepository, SqliteVerificationTokenRepository};

use folio_core::errors::{AuthError, DomainError};

/// Map a sqlx error to a domain error, turning unique-index violations into
/// `AuthError::Conflict`
pub(crate) fn map_sqlx_error(context: &str, error: sqlx::Error) -> DomainError {
    if let Some(db_error) = error.as_database_error() {
        if db_error.is_unique_violation() {
            return DomainError::Auth(AuthError::Conflict);
        }
    }
    DomainError::database(format!("{}: {}", context, error))
}
