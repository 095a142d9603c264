//! Content service module
//!
//! Public reads and editor-only writes for portfolio items.

mod service;

#[cfg(test)]
mod tests;

pub use service::ContentService;
