//! Request and response bodies

pub mod auth;
pub mod content;
pub mod error;

pub use error::{ErrorResponse, ErrorResponseExt};
