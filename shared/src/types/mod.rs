//! Type definitions module
//!
//! - `response` - Success envelopes and health checks

pub mod response;

pub use response::{HealthResponse, HealthStatus, OkResponse};
