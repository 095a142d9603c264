//! SQLite implementation of the VerificationTokenRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

use folio_core::domain::entities::verification_token::VerificationToken;
use folio_core::errors::{AuthError, DomainError};
use folio_core::repositories::VerificationTokenRepository;

use crate::database::map_sqlx_error;

/// SQLite implementation of VerificationTokenRepository
///
/// Tokens are consumed with `DELETE ... WHERE identifier = ? AND token = ?`;
/// the affected-row count tells the caller whether it won the token. A
/// redemption runs that delete and the password update in one transaction.
pub struct SqliteVerificationTokenRepository {
    pool: SqlitePool,
}

impl SqliteVerificationTokenRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_token(row: &SqliteRow) -> Result<VerificationToken, DomainError> {
        let get =
            |e: sqlx::Error| DomainError::database(format!("Failed to read token row: {}", e));

        Ok(VerificationToken {
            identifier: row.try_get("identifier").map_err(get)?,
            token: row.try_get("token").map_err(get)?,
            expires: row.try_get::<DateTime<Utc>, _>("expires").map_err(get)?,
        })
    }
}

#[async_trait]
impl VerificationTokenRepository for SqliteVerificationTokenRepository {
    async fn create(&self, token: VerificationToken) -> Result<VerificationToken, DomainError> {
        sqlx::query("INSERT INTO verification_tokens (identifier, token, expires) VALUES (?, ?, ?)")
            .bind(&token.identifier)
            .bind(&token.token)
            .bind(token.expires)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to store reset code", e))?;

        Ok(token)
    }

    async fn find(
        &self,
        identifier: &str,
        token: &str,
    ) -> Result<Option<VerificationToken>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT identifier, token, expires
            FROM verification_tokens
            WHERE identifier = ? AND token = ?
            LIMIT 1
            "#,
        )
        .bind(identifier)
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to find reset code", e))?;

        row.as_ref().map(Self::row_to_token).transpose()
    }

    async fn delete(&self, identifier: &str, token: &str) -> Result<bool, DomainError> {
        let result =
            sqlx::query("DELETE FROM verification_tokens WHERE identifier = ? AND token = ?")
                .bind(identifier)
                .bind(token)
                .execute(&self.pool)
                .await
                .map_err(|e| map_sqlx_error("Failed to delete reset code", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn redeem(
        &self,
        identifier: &str,
        token: &str,
        user_id: Uuid,
        password_hash: &str,
    ) -> Result<bool, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("Failed to begin reset transaction", e))?;

        let consumed =
            sqlx::query("DELETE FROM verification_tokens WHERE identifier = ? AND token = ?")
                .bind(identifier)
                .bind(token)
                .execute(&mut *tx)
                .await
                .map_err(|e| map_sqlx_error("Failed to consume reset code", e))?;

        if consumed.rows_affected() == 0 {
            return Ok(false);
        }

        let updated = sqlx::query("UPDATE users SET password_hash = ?, updated_at = ? WHERE id = ?")
            .bind(password_hash)
            .bind(Utc::now())
            .bind(user_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("Failed to update password", e))?;

        // Dropping the transaction rolls the code deletion back
        if updated.rows_affected() == 0 {
            return Err(AuthError::UserNotFound.into());
        }

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("Failed to commit password reset", e))?;

        Ok(true)
    }

    async fn delete_for_identifier(&self, identifier: &str) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM verification_tokens WHERE identifier = ?")
            .bind(identifier)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to delete reset codes", e))?;

        Ok(result.rows_affected())
    }

    async fn count_for_identifier(&self, identifier: &str) -> Result<u64, DomainError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM verification_tokens WHERE identifier = ?")
                .bind(identifier)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| map_sqlx_error("Failed to count reset codes", e))?;

        Ok(count.max(0) as u64)
    }
}
