//! SQLite implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Row, Sqlite, SqlitePool};
use uuid::Uuid;

use folio_core::domain::entities::user::{Role, User};
use folio_core::errors::DomainError;
use folio_core::repositories::UserRepository;

use super::parse_uuid;
use crate::database::map_sqlx_error;

const USER_COLUMNS: &str =
    "id, username, email, password_hash, name, role, created_at, updated_at";

const INSERT_USER: &str = r#"
    INSERT INTO users (id, username, email, password_hash, name, role, created_at, updated_at)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?)
"#;

fn insert_user(user: &User) -> Query<'_, Sqlite, SqliteArguments<'_>> {
    sqlx::query(INSERT_USER)
        .bind(user.id.to_string())
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.name)
        .bind(user.role.as_str())
        .bind(user.created_at)
        .bind(user.updated_at)
}

/// SQLite implementation of UserRepository
///
/// Uniqueness of `username` and `email` is enforced by the table's unique
/// indexes, so a lost registration race surfaces as `AuthError::Conflict`.
/// External sign-in identities live in `oauth_accounts`, keyed by
/// `(provider, provider_account_id)`.
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &SqliteRow) -> Result<User, DomainError> {
        let get = |e: sqlx::Error| DomainError::database(format!("Failed to read user row: {}", e));

        let id: String = row.try_get("id").map_err(get)?;
        let role: String = row.try_get("role").map_err(get)?;

        Ok(User {
            id: parse_uuid(&id)?,
            username: row.try_get("username").map_err(get)?,
            email: row.try_get("email").map_err(get)?,
            password_hash: row.try_get("password_hash").map_err(get)?,
            name: row.try_get("name").map_err(get)?,
            role: Role::parse_or_viewer(&role),
            created_at: row.try_get::<DateTime<Utc>, _>("created_at").map_err(get)?,
            updated_at: row.try_get::<DateTime<Utc>, _>("updated_at").map_err(get)?,
        })
    }

    async fn find_one(&self, column: &str, value: &str) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE {} = ? LIMIT 1", USER_COLUMNS, column);

        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to find user", e))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        self.find_one("username", username).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.find_one("email", email).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        self.find_one("id", &id.to_string()).await
    }

    async fn exists_by_username_or_email(
        &self,
        username: &str,
        email: Option<&str>,
    ) -> Result<bool, DomainError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM users WHERE username = ? OR (? IS NOT NULL AND email = ?)",
        )
        .bind(username)
        .bind(email)
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to check user existence", e))?;

        Ok(count > 0)
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        insert_user(&user)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to create user", e))?;

        Ok(user)
    }

    async fn find_by_oauth_account(
        &self,
        provider: &str,
        subject: &str,
    ) -> Result<Option<User>, DomainError> {
        let query = format!(
            "SELECT {} FROM users WHERE id = \
             (SELECT user_id FROM oauth_accounts WHERE provider = ? AND provider_account_id = ?)",
            USER_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(provider)
            .bind(subject)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to find linked account", e))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn create_with_oauth_account(
        &self,
        user: User,
        provider: &str,
        subject: &str,
    ) -> Result<User, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("Failed to begin account transaction", e))?;

        insert_user(&user)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("Failed to create user", e))?;

        sqlx::query(
            "INSERT INTO oauth_accounts (provider, provider_account_id, user_id, created_at) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(provider)
        .bind(subject)
        .bind(user.id.to_string())
        .bind(user.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("Failed to link account", e))?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("Failed to commit account", e))?;

        Ok(user)
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("UPDATE users SET password_hash = ?, updated_at = ? WHERE id = ?")
            .bind(password_hash)
            .bind(Utc::now())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to update password", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to count users", e))?;

        Ok(count.max(0) as u64)
    }
}
