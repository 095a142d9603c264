use actix_web::{web, HttpResponse};

use folio_shared::types::OkResponse;

use crate::middleware::OptionalPrincipal;
use crate::state::AppState;

use super::removal_cookie;

/// Handler for POST /api/auth/logout
///
/// Sessions are stateless, so logging out only clears the cookie. Always
/// answers `{ "ok": true }`, with or without a session.
pub async fn logout(state: web::Data<AppState>, principal: OptionalPrincipal) -> HttpResponse {
    if let Some(principal) = principal.0 {
        tracing::info!(username = %principal.username, "User logged out");
    }

    HttpResponse::Ok()
        .cookie(removal_cookie(&state.session_config))
        .json(OkResponse::empty())
}
