//! Content service implementation

use std::sync::Arc;

use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::domain::entities::content::{ContentItem, ContentKind, ContentPayload};
use crate::domain::value_objects::SessionPrincipal;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::ContentRepository;
use crate::services::authorization::require_editor;

/// CRUD over portfolio content
///
/// Every write checks the caller's role before the store is touched.
pub struct ContentService<C>
where
    C: ContentRepository,
{
    repository: Arc<C>,
}

impl<C> ContentService<C>
where
    C: ContentRepository,
{
    pub fn new(repository: Arc<C>) -> Self {
        Self { repository }
    }

    /// List a category, newest first. No session required.
    pub async fn list(&self, kind: ContentKind) -> DomainResult<Vec<ContentItem>> {
        self.repository.list(kind).await
    }

    pub async fn get(&self, kind: ContentKind, id: Uuid) -> DomainResult<ContentItem> {
        self.repository
            .find(kind, id)
            .await?
            .ok_or_else(|| not_found(kind, id))
    }

    /// Create an item from a JSON body
    ///
    /// # Returns
    ///
    /// * `Ok(ContentItem)` - The stored item
    /// * `Err(AuthError::Forbidden)` - Caller is not an editor
    /// * `Err(ValidationError)` - Body is missing a required field
    pub async fn create(
        &self,
        principal: &SessionPrincipal,
        kind: ContentKind,
        body: Value,
    ) -> DomainResult<ContentItem> {
        require_editor(principal)?;

        let payload = ContentPayload::from_json(kind, body)?;
        let item = self.repository.create(ContentItem::new(payload)).await?;

        info!(kind = %kind, id = %item.id, username = %principal.username, "Content created");
        Ok(item)
    }

    /// Replace the fields of an existing item
    pub async fn update(
        &self,
        principal: &SessionPrincipal,
        kind: ContentKind,
        id: Uuid,
        body: Value,
    ) -> DomainResult<ContentItem> {
        require_editor(principal)?;

        let payload = ContentPayload::from_json(kind, body)?;
        let mut item = self
            .repository
            .find(kind, id)
            .await?
            .ok_or_else(|| not_found(kind, id))?;
        item.replace_payload(payload);

        let item = self.repository.update(item).await?;
        info!(kind = %kind, id = %item.id, username = %principal.username, "Content updated");
        Ok(item)
    }

    pub async fn delete(
        &self,
        principal: &SessionPrincipal,
        kind: ContentKind,
        id: Uuid,
    ) -> DomainResult<()> {
        require_editor(principal)?;

        if !self.repository.delete(kind, id).await? {
            return Err(not_found(kind, id));
        }
        info!(kind = %kind, id = %id, username = %principal.username, "Content deleted");
        Ok(())
    }
}

fn not_found(kind: ContentKind, id: Uuid) -> DomainError {
    DomainError::not_found(format!("{} item {}", kind, id))
}
