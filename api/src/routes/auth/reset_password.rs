use actix_web::{web, HttpResponse};
use validator::Validate;

use folio_shared::types::OkResponse;

use crate::dto::auth::{MessageResponse, ResetPasswordRequest};
use crate::handlers::{handle_domain_error, handle_validation_errors};
use crate::state::AppState;

/// Message returned whether or not an account matched
const RESET_REQUESTED_MESSAGE: &str =
    "If an account with an email address exists, a reset code has been sent";

/// Handler for POST /api/auth/reset-password
///
/// # Request Body
///
/// ```json
/// { "identifier": "alice" }
/// ```
///
/// A username or an email address is accepted (`email` and `username` are
/// aliases of `identifier`).
///
/// # Response
///
/// ## Success (200 OK)
/// `{ "ok": true, "message": ... }`, identical for known and unknown
/// identifiers and regardless of email delivery.
///
/// ## Errors
/// - 400 Bad Request: identifier missing, or the account has no email
/// - 404 Not Found: unknown identifier, only when the reset policy reveals it
pub async fn reset_password(
    state: web::Data<AppState>,
    request: web::Json<ResetPasswordRequest>,
) -> HttpResponse {
    let request = request.into_inner();
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }

    let identifier = request.identifier.unwrap_or_default();
    match state.reset_service.request_reset(&identifier).await {
        Ok(_) => HttpResponse::Ok().json(OkResponse::new(MessageResponse::new(
            RESET_REQUESTED_MESSAGE,
        ))),
        Err(error) => handle_domain_error(&error),
    }
}
