//! Mock implementation of ContentRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::content::{ContentItem, ContentKind};
use crate::errors::DomainError;

use super::trait_::ContentRepository;

/// In-memory content store that counts write calls
#[derive(Clone, Default)]
pub struct MockContentRepository {
    items: Arc<RwLock<HashMap<Uuid, ContentItem>>>,
    writes: Arc<AtomicUsize>,
}

impl MockContentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of create/update/delete calls that reached the store
    pub fn write_calls(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentRepository for MockContentRepository {
    async fn list(&self, kind: ContentKind) -> Result<Vec<ContentItem>, DomainError> {
        let items = self.items.read().await;
        let mut list: Vec<ContentItem> = items.values().filter(|i| i.kind == kind).cloned().collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(list)
    }

    async fn find(&self, kind: ContentKind, id: Uuid) -> Result<Option<ContentItem>, DomainError> {
        let items = self.items.read().await;
        Ok(items.get(&id).filter(|i| i.kind == kind).cloned())
    }

    async fn create(&self, item: ContentItem) -> Result<ContentItem, DomainError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.items.write().await.insert(item.id, item.clone());
        Ok(item)
    }

    async fn update(&self, item: ContentItem) -> Result<ContentItem, DomainError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut items = self.items.write().await;
        match items.get(&item.id) {
            Some(existing) if existing.kind == item.kind => {
                items.insert(item.id, item.clone());
                Ok(item)
            }
            _ => Err(DomainError::not_found(item.kind.as_str())),
        }
    }

    async fn delete(&self, kind: ContentKind, id: Uuid) -> Result<bool, DomainError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut items = self.items.write().await;
        if items.get(&id).map_or(false, |i| i.kind == kind) {
            items.remove(&id);
            return Ok(true);
        }
        Ok(false)
    }
}
