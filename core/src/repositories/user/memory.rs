//! In-memory implementation of UserRepository
//!
//! Used when no database URL is configured, and by tests.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::user::{NewUser, User};
use crate::errors::DomainError;

use super::trait_::UserRepository;

#[derive(Debug, Default)]
struct UserTable {
    rows: BTreeMap<i64, User>,
    last_id: i64,
}

impl UserTable {
    fn email_taken(&self, email: &str, except_id: Option<i64>) -> bool {
        self.rows
            .values()
            .any(|u| Some(u.id) != except_id && u.has_email(email))
    }
}

/// Process-local user store; clones share the same table
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    table: Arc<RwLock<UserTable>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let table = self.table.read().await;
        Ok(table.rows.values().find(|u| u.has_email(email)).cloned())
    }

    async fn email_taken(&self, email: &str, except_id: Option<i64>) -> Result<bool, DomainError> {
        let table = self.table.read().await;
        Ok(table.email_taken(email, except_id))
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let mut table = self.table.write().await;

        if table.email_taken(&user.email, None) {
            return Err(DomainError::email_taken());
        }

        table.last_id += 1;
        let user = user.into_user(table.last_id, Utc::now());
        table.rows.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, mut user: User) -> Result<User, DomainError> {
        let mut table = self.table.write().await;

        let Some(existing) = table.rows.get(&user.id) else {
            return Err(DomainError::user_not_found());
        };
        let created_at = existing.created_at;

        if table.email_taken(&user.email, Some(user.id)) {
            return Err(DomainError::email_taken());
        }

        user.created_at = created_at;
        user.updated_at = Utc::now();
        table.rows.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let mut table = self.table.write().await;
        Ok(table.rows.remove(&id).is_some())
    }
}
