//! Content route parameters

use serde::Deserialize;

/// `/api/{category}`
#[derive(Debug, Deserialize)]
pub struct CategoryPath {
    pub category: String,
}

/// `/api/{category}/{id}`
#[derive(Debug, Deserialize)]
pub struct ItemPath {
    pub category: String,
    pub id: String,
}
