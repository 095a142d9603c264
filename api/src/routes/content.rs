//! Portfolio content route handlers
//!
//! Reads are public. Writes require a session whose role is `editor`; the
//! role is checked by the content service before anything is stored.

use actix_web::{web, HttpResponse};
use serde_json::Value;
use uuid::Uuid;

use folio_core::domain::entities::content::ContentKind;
use folio_core::errors::DomainError;
use folio_shared::types::OkResponse;

use crate::dto::content::{CategoryPath, ItemPath};
use crate::handlers::handle_domain_error;
use crate::middleware::Authenticated;
use crate::state::AppState;

fn parse_kind(category: &str) -> Result<ContentKind, HttpResponse> {
    category
        .parse::<ContentKind>()
        .map_err(|e| handle_domain_error(&DomainError::ValidationErr(e)))
}

/// Malformed ids cannot name a stored item
fn parse_id(kind: ContentKind, id: &str) -> Result<Uuid, HttpResponse> {
    Uuid::parse_str(id).map_err(|_| {
        handle_domain_error(&DomainError::not_found(format!("{} item {}", kind, id)))
    })
}

/// Handler for GET /api/{category}
///
/// Returns the category's items as a JSON array, newest first.
pub async fn list(state: web::Data<AppState>, path: web::Path<CategoryPath>) -> HttpResponse {
    let kind = match parse_kind(&path.category) {
        Ok(kind) => kind,
        Err(response) => return response,
    };

    match state.content_service.list(kind).await {
        Ok(items) => HttpResponse::Ok().json(items),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for GET /api/{category}/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<ItemPath>) -> HttpResponse {
    let kind = match parse_kind(&path.category) {
        Ok(kind) => kind,
        Err(response) => return response,
    };
    let id = match parse_id(kind, &path.id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.content_service.get(kind, id).await {
        Ok(item) => HttpResponse::Ok().json(item),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for POST /api/{category}
///
/// # Response
///
/// ## Success (201 Created)
/// The stored item.
///
/// ## Errors
/// - 401 Unauthorized: no valid session
/// - 403 Forbidden: session role is not `editor`
/// - 400 Bad Request: required field missing
pub async fn create(
    state: web::Data<AppState>,
    principal: Authenticated,
    path: web::Path<CategoryPath>,
    body: web::Json<Value>,
) -> HttpResponse {
    let kind = match parse_kind(&path.category) {
        Ok(kind) => kind,
        Err(response) => return response,
    };

    match state
        .content_service
        .create(&principal.0, kind, body.into_inner())
        .await
    {
        Ok(item) => HttpResponse::Created().json(item),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for PUT /api/{category}/{id}
pub async fn update(
    state: web::Data<AppState>,
    principal: Authenticated,
    path: web::Path<ItemPath>,
    body: web::Json<Value>,
) -> HttpResponse {
    let kind = match parse_kind(&path.category) {
        Ok(kind) => kind,
        Err(response) => return response,
    };
    let id = match parse_id(kind, &path.id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state
        .content_service
        .update(&principal.0, kind, id, body.into_inner())
        .await
    {
        Ok(item) => HttpResponse::Ok().json(item),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for DELETE /api/{category}/{id}
///
/// Answers `{ "ok": true }` once the item is gone.
pub async fn delete(
    state: web::Data<AppState>,
    principal: Authenticated,
    path: web::Path<ItemPath>,
) -> HttpResponse {
    let kind = match parse_kind(&path.category) {
        Ok(kind) => kind,
        Err(response) => return response,
    };
    let id = match parse_id(kind, &path.id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.content_service.delete(&principal.0, kind, id).await {
        Ok(()) => HttpResponse::Ok().json(OkResponse::empty()),
        Err(error) => handle_domain_error(&error),
    }
}
