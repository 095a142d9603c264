//! Editor dashboard entry point
//!
//! Mounted behind `SessionGate::redirect()`, so the handler only runs with a
//! verified principal in the request extensions.

use actix_web::HttpResponse;
use serde::Serialize;

use folio_shared::types::OkResponse;

use crate::middleware::Authenticated;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AdminOverview {
    username: String,
    role: String,
    can_edit: bool,
}

/// Handler for GET /admin
pub async fn dashboard(principal: Authenticated) -> HttpResponse {
    let principal = principal.0;
    HttpResponse::Ok().json(OkResponse::new(AdminOverview {
        can_edit: principal.can_mutate(),
        role: principal.role.to_string(),
        username: principal.username,
    }))
}
