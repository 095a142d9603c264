use actix_web::{web, HttpResponse};
use validator::Validate;

use folio_core::services::RegisterCommand;
use folio_shared::types::OkResponse;

use crate::dto::auth::{RegisterRequest, RegisterResponse};
use crate::handlers::{handle_domain_error, handle_validation_errors};
use crate::state::AppState;

/// Handler for POST /api/auth/register
///
/// # Request Body
///
/// ```json
/// { "username": "alice", "password": "secret1", "email": "alice@example.com", "name": "Alice" }
/// ```
///
/// # Response
///
/// ## Success (201 Created)
/// `{ "ok": true, "user": { "id", "username", "email", "name", "role": "viewer" } }`
///
/// ## Errors
/// - 400 Bad Request: missing or short username/password, malformed email
/// - 409 Conflict: username or email already registered
pub async fn register(
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse {
    let request = request.into_inner();
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }

    let command = RegisterCommand {
        username: request.username.unwrap_or_default(),
        password: request.password.unwrap_or_default(),
        email: request.email,
        name: request.name,
    };

    match state.auth_service.register(command).await {
        Ok(user) => HttpResponse::Created().json(OkResponse::new(RegisterResponse { user })),
        Err(error) => handle_domain_error(&error),
    }
}
