//! Error type definitions for authentication, validation and hashing
//!
//! Messages are user-facing. Credential and enumeration-sensitive failures
//! deliberately use generic wording.

use thiserror::Error;

/// Authentication and authorization errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("User already exists")]
    Conflict,

    #[error("Invalid or expired verification code")]
    InvalidCode,

    #[error("Verification code has expired")]
    CodeExpired,

    #[error("No email address is associated with this account")]
    NoEmailOnAccount,

    #[error("User not found")]
    UserNotFound,

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Your role ({role}) does not allow this action")]
    Forbidden { role: String },

    #[error("An account already uses this email; sign in with your password")]
    AccountNotLinked,

    #[error("Sign-in with {provider} failed")]
    OAuthFailed { provider: String },
}

/// Input validation errors naming the offending field
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    RequiredField { field: String },

    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    #[error("{field} has an invalid format")]
    InvalidFormat { field: String },
}

impl ValidationError {
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::RequiredField { field: field.into() }
    }

    pub fn too_short(field: impl Into<String>, min: usize) -> Self {
        ValidationError::TooShort {
            field: field.into(),
            min,
        }
    }

    /// Name of the field that failed validation
    pub fn field(&self) -> &str {
        match self {
            ValidationError::RequiredField { field }
            | ValidationError::TooShort { field, .. }
            | ValidationError::InvalidFormat { field } => field,
        }
    }
}

/// Password hashing errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HashError {
    #[error("Password must not be empty")]
    InvalidInput,

    #[error("Password hashing failed: {0}")]
    Backend(String),
}
