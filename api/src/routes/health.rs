//! Health check route

use actix_web::{web, HttpResponse};

use folio_shared::types::{HealthResponse, HealthStatus};

use crate::state::AppState;

/// Handler for GET /health
///
/// 200 with `healthy` when the store answers, 503 otherwise.
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    let version = env!("CARGO_PKG_VERSION");

    match state.database.health_check().await {
        Ok(true) => HttpResponse::Ok().json(HealthResponse::new(HealthStatus::Healthy, version)),
        Ok(false) => HttpResponse::ServiceUnavailable()
            .json(HealthResponse::new(HealthStatus::Degraded, version)),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            HttpResponse::ServiceUnavailable()
                .json(HealthResponse::new(HealthStatus::Unhealthy, version))
        }
    }
}
