use actix_web::{web, HttpResponse};
use validator::Validate;

use folio_core::services::VerifyResetCommand;
use folio_shared::types::OkResponse;

use crate::dto::auth::{MessageResponse, VerifyResetRequest};
use crate::handlers::{handle_domain_error, handle_validation_errors};
use crate::state::AppState;

/// Handler for POST /api/auth/verify-reset
///
/// # Request Body
///
/// ```json
/// { "email": "alice@example.com", "code": "042917", "newPassword": "secret2" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// `{ "ok": true, "message": "Password has been reset" }`
///
/// ## Errors
/// - 400 Bad Request: missing field, short password, wrong or expired code
/// - 404 Not Found: no account holds the email
pub async fn verify_reset(
    state: web::Data<AppState>,
    request: web::Json<VerifyResetRequest>,
) -> HttpResponse {
    let request = request.into_inner();
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }

    let command = VerifyResetCommand {
        email: request.email.unwrap_or_default(),
        code: request.code.unwrap_or_default(),
        new_password: request.new_password.unwrap_or_default(),
    };

    match state.reset_service.verify_reset(command).await {
        Ok(()) => HttpResponse::Ok().json(OkResponse::new(MessageResponse::new(
            "Password has been reset",
        ))),
        Err(error) => handle_domain_error(&error),
    }
}
