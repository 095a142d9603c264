//! API success envelopes and health checks

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Success envelope `{ "ok": true, ...payload }`
///
/// The payload is flattened so handlers can attach `principal`, `user` or
/// `message` objects next to the flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OkResponse<T> {
    /// Always true
    pub ok: bool,

    #[serde(flatten)]
    pub data: T,
}

impl<T> OkResponse<T> {
    /// Wrap a payload in a success envelope
    pub fn new(data: T) -> Self {
        Self { ok: true, data }
    }
}

impl OkResponse<serde_json::Map<String, serde_json::Value>> {
    /// Bare `{ "ok": true }`
    pub fn empty() -> Self {
        Self::new(serde_json::Map::new())
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall health status
    pub status: HealthStatus,

    /// Server version
    pub version: String,

    /// Server timestamp
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn new(status: HealthStatus, version: impl Into<String>) -> Self {
        Self {
            status,
            version: version.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Health status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}
