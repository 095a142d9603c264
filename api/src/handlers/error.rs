//! Mapping of domain errors to HTTP responses
//!
//! Every failure leaves the API as `{ok:false, error, message, details?, timestamp}`.
//! Store and hashing failures are logged in full and answered with a generic
//! 500 so no internals leak to the client.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use validator::ValidationErrors;

use folio_core::errors::{AuthError, DomainError, ValidationError};
use folio_shared::errors::error_codes;

use crate::dto::{ErrorResponse, ErrorResponseExt};

/// Status code and error code for a domain error
pub fn classify(error: &DomainError) -> (StatusCode, &'static str) {
    match error {
        DomainError::Validation { .. } | DomainError::ValidationErr(_) => {
            (StatusCode::BAD_REQUEST, error_codes::VALIDATION_ERROR)
        }
        DomainError::NotFound { .. } => (StatusCode::NOT_FOUND, error_codes::NOT_FOUND),
        DomainError::Auth(auth) => match auth {
            AuthError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, error_codes::INVALID_CREDENTIALS)
            }
            AuthError::Conflict => (StatusCode::CONFLICT, error_codes::CONFLICT),
            AuthError::InvalidCode => (StatusCode::BAD_REQUEST, error_codes::INVALID_CODE),
            AuthError::CodeExpired => (StatusCode::BAD_REQUEST, error_codes::CODE_EXPIRED),
            AuthError::NoEmailOnAccount => {
                (StatusCode::BAD_REQUEST, error_codes::NO_EMAIL_ON_ACCOUNT)
            }
            AuthError::UserNotFound => (StatusCode::NOT_FOUND, error_codes::USER_NOT_FOUND),
            AuthError::Unauthenticated => (StatusCode::UNAUTHORIZED, error_codes::UNAUTHENTICATED),
            AuthError::Forbidden { .. } => (StatusCode::FORBIDDEN, error_codes::FORBIDDEN),
            AuthError::AccountNotLinked => (StatusCode::CONFLICT, error_codes::ACCOUNT_NOT_LINKED),
            AuthError::OAuthFailed { .. } => (StatusCode::UNAUTHORIZED, error_codes::OAUTH_FAILED),
        },
        DomainError::Internal { .. } | DomainError::Database { .. } | DomainError::Hash(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, error_codes::INTERNAL_ERROR)
        }
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    let (status, code) = classify(error);

    if status.is_server_error() {
        tracing::error!(error = ?error, "Request failed");
        return ErrorResponse::new(code, "An internal error occurred").to_response(status);
    }

    tracing::debug!(status = status.as_u16(), code, "Request rejected");
    let mut response = ErrorResponse::new(code, error.to_string());
    match error {
        DomainError::ValidationErr(validation) => {
            response = response.add_detail("field", validation.field());
            if let ValidationError::TooShort { min, .. } = validation {
                response = response.add_detail("min", min);
            }
        }
        DomainError::Auth(AuthError::Forbidden { role }) => {
            response = response.add_detail("role", role);
        }
        _ => {}
    }
    response.to_response(status)
}

/// Handle `validator` failures on request bodies
pub fn handle_validation_errors(errors: &ValidationErrors) -> HttpResponse {
    let mut fields: Vec<&str> = errors.field_errors().keys().copied().collect();
    fields.sort_unstable();

    let message = match fields.first() {
        Some(field) => format!("{} is too long", field),
        None => "Invalid request body".to_string(),
    };

    ErrorResponse::new(error_codes::VALIDATION_ERROR, message)
        .add_detail("fields", &fields)
        .to_response(StatusCode::BAD_REQUEST)
}

/// Domain error carried through actix's error path (extractors)
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub DomainError);

impl ApiError {
    pub fn unauthenticated() -> Self {
        Self(DomainError::Auth(AuthError::Unauthenticated))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        classify(&self.0).0
    }

    fn error_response(&self) -> HttpResponse {
        handle_domain_error(&self.0)
    }
}
