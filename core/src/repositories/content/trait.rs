//! Content repository trait for portfolio items.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::content::{ContentItem, ContentKind};
use crate::errors::DomainError;

#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// List items of a category, newest first
    async fn list(&self, kind: ContentKind) -> Result<Vec<ContentItem>, DomainError>;

    /// Find an item by category and id
    async fn find(&self, kind: ContentKind, id: Uuid) -> Result<Option<ContentItem>, DomainError>;

    async fn create(&self, item: ContentItem) -> Result<ContentItem, DomainError>;

    /// Persist a modified item
    ///
    /// # Returns
    /// * `Err(DomainError::NotFound)` - No item with that id in the category
    async fn update(&self, item: ContentItem) -> Result<ContentItem, DomainError>;

    /// Delete an item, returning whether it existed
    async fn delete(&self, kind: ContentKind, id: Uuid) -> Result<bool, DomainError>;
}
