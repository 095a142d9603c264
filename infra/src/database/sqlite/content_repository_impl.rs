//! SQLite implementation of the ContentRepository trait.
//!
//! Items of every category share one table; the category-specific fields are
//! kept as a JSON document in `payload`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

use folio_core::domain::entities::content::{ContentItem, ContentKind, ContentPayload};
use folio_core::errors::DomainError;
use folio_core::repositories::ContentRepository;

use super::parse_uuid;
use crate::database::map_sqlx_error;

pub struct SqliteContentRepository {
    pool: SqlitePool,
}

impl SqliteContentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_item(row: &SqliteRow) -> Result<ContentItem, DomainError> {
        let get =
            |e: sqlx::Error| DomainError::database(format!("Failed to read content row: {}", e));

        let id: String = row.try_get("id").map_err(get)?;
        let kind: String = row.try_get("kind").map_err(get)?;
        let payload: String = row.try_get("payload").map_err(get)?;

        let kind: ContentKind = kind
            .parse()
            .map_err(|_| DomainError::database(format!("Unknown content kind: {}", kind)))?;
        let value: serde_json::Value = serde_json::from_str(&payload)
            .map_err(|e| DomainError::database(format!("Corrupt content payload: {}", e)))?;
        let payload = ContentPayload::from_json(kind, value)
            .map_err(|e| DomainError::database(format!("Invalid stored content: {}", e)))?;

        Ok(ContentItem {
            id: parse_uuid(&id)?,
            kind,
            payload,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at").map_err(get)?,
            updated_at: row.try_get::<DateTime<Utc>, _>("updated_at").map_err(get)?,
        })
    }

    fn payload_json(item: &ContentItem) -> Result<String, DomainError> {
        serde_json::to_string(&item.payload).map_err(|e| DomainError::Internal {
            message: format!("Failed to encode content payload: {}", e),
        })
    }
}

#[async_trait]
impl ContentRepository for SqliteContentRepository {
    async fn list(&self, kind: ContentKind) -> Result<Vec<ContentItem>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, kind, payload, created_at, updated_at
            FROM content_items
            WHERE kind = ?
            ORDER BY created_at DESC, rowid DESC
            "#,
        )
        .bind(kind.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to list content", e))?;

        rows.iter().map(Self::row_to_item).collect()
    }

    async fn find(&self, kind: ContentKind, id: Uuid) -> Result<Option<ContentItem>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, kind, payload, created_at, updated_at
            FROM content_items
            WHERE id = ? AND kind = ?
            "#,
        )
        .bind(id.to_string())
        .bind(kind.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to find content", e))?;

        row.as_ref().map(Self::row_to_item).transpose()
    }

    async fn create(&self, item: ContentItem) -> Result<ContentItem, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO content_items (id, kind, payload, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(item.id.to_string())
        .bind(item.kind.as_str())
        .bind(Self::payload_json(&item)?)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to create content", e))?;

        Ok(item)
    }

    async fn update(&self, item: ContentItem) -> Result<ContentItem, DomainError> {
        let result = sqlx::query(
            "UPDATE content_items SET payload = ?, updated_at = ? WHERE id = ? AND kind = ?",
        )
        .bind(Self::payload_json(&item)?)
        .bind(item.updated_at)
        .bind(item.id.to_string())
        .bind(item.kind.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to update content", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!("{} item {}", item.kind, item.id)));
        }
        Ok(item)
    }

    async fn delete(&self, kind: ContentKind, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM content_items WHERE id = ? AND kind = ?")
            .bind(id.to_string())
            .bind(kind.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to delete content", e))?;

        Ok(result.rows_affected() > 0)
    }
}
