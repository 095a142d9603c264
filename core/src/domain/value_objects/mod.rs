//! Value objects representing immutable domain concepts.

pub mod principal;

pub use principal::SessionPrincipal;
