//! Common utility functions

pub mod validation;

pub use validation::{classify_identifier, is_email, non_blank, IdentifierKind};
