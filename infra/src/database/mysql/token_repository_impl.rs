//! MySQL implementation of the TokenRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{mysql::MySqlRow, MySqlPool, Row};

use uh_core::domain::entities::token::{NewAccessToken, PersonalAccessToken};
use uh_core::errors::DomainError;
use uh_core::repositories::TokenRepository;

use super::query_failed;

const TOKEN_COLUMNS: &str = "id, user_id, name, token, last_used_at, expires_at, created_at";

/// MySQL implementation of TokenRepository
///
/// Rows are removed by the `ON DELETE CASCADE` foreign key when their user is deleted.
pub struct MySqlTokenRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlTokenRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to PersonalAccessToken entity
    fn row_to_token(row: &MySqlRow) -> Result<PersonalAccessToken, DomainError> {
        let column = |name: &str, e: sqlx::Error| {
            DomainError::internal(format!("Failed to get {}: {}", name, e))
        };

        Ok(PersonalAccessToken {
            id: row.try_get("id").map_err(|e| column("id", e))?,
            user_id: row.try_get("user_id").map_err(|e| column("user_id", e))?,
            name: row.try_get("name").map_err(|e| column("name", e))?,
            token_hash: row.try_get("token").map_err(|e| column("token", e))?,
            last_used_at: row
                .try_get::<Option<DateTime<Utc>>, _>("last_used_at")
                .map_err(|e| column("last_used_at", e))?,
            expires_at: row
                .try_get::<Option<DateTime<Utc>>, _>("expires_at")
                .map_err(|e| column("expires_at", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column("created_at", e))?,
        })
    }
}

#[async_trait]
impl TokenRepository for MySqlTokenRepository {
    async fn create(&self, token: NewAccessToken) -> Result<PersonalAccessToken, DomainError> {
        let result = sqlx::query(
            "INSERT INTO personal_access_tokens (user_id, name, token, expires_at) VALUES (?, ?, ?, ?)",
        )
        .bind(token.user_id)
        .bind(&token.name)
        .bind(&token.token_hash)
        .bind(token.expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| query_failed("Failed to save access token", e))?;

        let id = result.last_insert_id() as i64;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::internal("Inserted token could not be read back"))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<PersonalAccessToken>, DomainError> {
        let query = format!(
            "SELECT {} FROM personal_access_tokens WHERE id = ? LIMIT 1",
            TOKEN_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_failed("Failed to find access token", e))?;

        row.as_ref().map(Self::row_to_token).transpose()
    }

    async fn touch(&self, id: i64, used_at: DateTime<Utc>) -> Result<(), DomainError> {
        sqlx::query("UPDATE personal_access_tokens SET last_used_at = ? WHERE id = ?")
            .bind(used_at)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| query_failed("Failed to update token last_used_at", e))?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM personal_access_tokens WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| query_failed("Failed to delete access token", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_for_user(&self, user_id: i64) -> Result<usize, DomainError> {
        let result = sqlx::query("DELETE FROM personal_access_tokens WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| query_failed("Failed to delete user tokens", e))?;

        Ok(result.rows_affected() as usize)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let result = sqlx::query(
            "DELETE FROM personal_access_tokens WHERE expires_at IS NOT NULL AND expires_at <= ?",
        )
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| query_failed("Failed to delete expired tokens", e))?;

        Ok(result.rows_affected() as usize)
    }
}
