use actix_web::{web, HttpResponse};
use validator::Validate;

use folio_shared::types::OkResponse;

use crate::dto::auth::{LoginRequest, PrincipalDto, SessionResponse};
use crate::handlers::{handle_domain_error, handle_validation_errors};
use crate::state::AppState;

use super::session_cookie;

/// Handler for POST /api/auth/login
///
/// # Request Body
///
/// ```json
/// { "identifier": "alice", "password": "secret1" }
/// ```
///
/// `usernameOrIdentifier`, `username` and `email` are accepted in place of
/// `identifier`; the value is always matched against usernames.
///
/// # Response
///
/// ## Success (200 OK)
/// Sets the session cookie and returns
/// `{ "ok": true, "principal": { "username", "role", "canEdit" }, "expiresAt" }`.
///
/// ## Errors
/// - 400 Bad Request: identifier or password missing
/// - 401 Unauthorized: unknown user or wrong password (indistinguishable)
pub async fn login(state: web::Data<AppState>, request: web::Json<LoginRequest>) -> HttpResponse {
    let request = request.into_inner();
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }

    let identifier = request.identifier.unwrap_or_default();
    let password = request.password.unwrap_or_default();

    let principal = match state.auth_service.authenticate(&identifier, &password).await {
        Ok(principal) => principal,
        Err(error) => return handle_domain_error(&error),
    };

    match state.session_service.issue(&principal) {
        Ok(session) => HttpResponse::Ok()
            .cookie(session_cookie(&state.session_config, session.token))
            .json(OkResponse::new(SessionResponse {
                principal: PrincipalDto::from(&principal),
                expires_at: Some(session.expires_at),
            })),
        Err(error) => handle_domain_error(&error),
    }
}
