//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{mysql::MySqlRow, MySqlPool, Row};

use uh_core::domain::entities::user::{NewUser, User};
use uh_core::errors::DomainError;
use uh_core::repositories::UserRepository;

use super::{is_unique_violation, query_failed};

const USER_COLUMNS: &str =
    "id, name, email, password, email_verified_at, created_at, updated_at";

/// MySQL implementation of UserRepository
///
/// Email uniqueness is enforced by the `users_email_unique` index; its
/// case-insensitive collation matches the in-memory store's comparison.
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &MySqlRow) -> Result<User, DomainError> {
        let column = |name: &str, e: sqlx::Error| {
            DomainError::internal(format!("Failed to get {}: {}", name, e))
        };

        Ok(User {
            id: row.try_get("id").map_err(|e| column("id", e))?,
            name: row.try_get("name").map_err(|e| column("name", e))?,
            email: row.try_get("email").map_err(|e| column("email", e))?,
            password_hash: row.try_get("password").map_err(|e| column("password", e))?,
            email_verified_at: row
                .try_get::<Option<DateTime<Utc>>, _>("email_verified_at")
                .map_err(|e| column("email_verified_at", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column("created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| column("updated_at", e))?,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let query = format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS);

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| query_failed("Failed to list users", e))?;

        rows.iter().map(Self::row_to_user).collect()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE id = ? LIMIT 1", USER_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_failed("Failed to find user by id", e))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE email = ? LIMIT 1", USER_COLUMNS);

        let row = sqlx::query(&query)
            .bind(email.trim())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_failed("Failed to find user by email", e))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn email_taken(&self, email: &str, except_id: Option<i64>) -> Result<bool, DomainError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM users WHERE email = ? AND (? IS NULL OR id <> ?)",
        )
        .bind(email.trim())
        .bind(except_id)
        .bind(except_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| query_failed("Failed to check email uniqueness", e))?;

        Ok(count > 0)
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let result = sqlx::query("INSERT INTO users (name, email, password) VALUES (?, ?, ?)")
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    DomainError::email_taken()
                } else {
                    query_failed("Failed to create user", e)
                }
            })?;

        let id = result.last_insert_id() as i64;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::internal("Inserted user could not be read back"))
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET name = ?, email = ?, password = ?, email_verified_at = ?,
                updated_at = CURRENT_TIMESTAMP(6)
            WHERE id = ?
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.email_verified_at)
        .bind(user.id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::email_taken()
            } else {
                query_failed("Failed to update user", e)
            }
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::user_not_found());
        }

        self.find_by_id(user.id)
            .await?
            .ok_or_else(DomainError::user_not_found)
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| query_failed("Failed to delete user", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| query_failed("Database ping failed", e))?;
        Ok(())
    }
}
