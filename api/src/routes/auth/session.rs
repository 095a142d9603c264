use actix_web::{web, HttpRequest, HttpResponse};

use folio_shared::types::OkResponse;

use crate::dto::auth::{PrincipalDto, SessionResponse};
use crate::middleware::session::extract_session_token;
use crate::middleware::Authenticated;
use crate::state::AppState;

/// Handler for GET /api/auth/session
///
/// Returns the principal of the current session, or 401 `UNAUTHENTICATED`.
pub async fn session(
    req: HttpRequest,
    state: web::Data<AppState>,
    principal: Authenticated,
) -> HttpResponse {
    let expires_at = extract_session_token(
        req.cookie(&state.session_config.cookie_name),
        req.headers(),
    )
    .and_then(|token| state.session_service.expires_at(&token));

    HttpResponse::Ok().json(OkResponse::new(SessionResponse {
        principal: PrincipalDto::from(&principal.0),
        expires_at,
    }))
}
