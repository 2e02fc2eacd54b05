//! In-memory implementation of TokenRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::token::{NewAccessToken, PersonalAccessToken};
use crate::errors::DomainError;

use super::trait_::TokenRepository;

#[derive(Debug, Default)]
struct TokenTable {
    rows: BTreeMap<i64, PersonalAccessToken>,
    last_id: i64,
}

/// Process-local token store; clones share the same table
#[derive(Debug, Clone, Default)]
pub struct InMemoryTokenRepository {
    table: Arc<RwLock<TokenTable>>,
}

impl InMemoryTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored tokens across all users
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl TokenRepository for InMemoryTokenRepository {
    async fn create(&self, token: NewAccessToken) -> Result<PersonalAccessToken, DomainError> {
        let mut table = self.table.write().await;
        table.last_id += 1;
        let token = token.into_token(table.last_id, Utc::now());
        table.rows.insert(token.id, token.clone());
        Ok(token)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<PersonalAccessToken>, DomainError> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn touch(&self, id: i64, used_at: DateTime<Utc>) -> Result<(), DomainError> {
        let mut table = self.table.write().await;
        if let Some(token) = table.rows.get_mut(&id) {
            token.last_used_at = Some(used_at);
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let mut table = self.table.write().await;
        Ok(table.rows.remove(&id).is_some())
    }

    async fn delete_for_user(&self, user_id: i64) -> Result<usize, DomainError> {
        let mut table = self.table.write().await;
        let before = table.rows.len();
        table.rows.retain(|_, t| t.user_id != user_id);
        Ok(before - table.rows.len())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let mut table = self.table.write().await;
        let before = table.rows.len();
        table.rows.retain(|_, t| !t.is_expired_at(now));
        Ok(before - table.rows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn new_token(user_id: i64, expires_at: Option<DateTime<Utc>>) -> NewAccessToken {
        NewAccessToken {
            user_id,
            name: "api-token".to_string(),
            token_hash: format!("hash-{user_id}"),
            expires_at,
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = InMemoryTokenRepository::new();
        let token = repo.create(new_token(1, None)).await.unwrap();
        assert_eq!(token.id, 1);
        assert_eq!(repo.find_by_id(1).await.unwrap(), Some(token));
        assert_eq!(repo.find_by_id(2).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_single_leaves_others() {
        let repo = InMemoryTokenRepository::new();
        let first = repo.create(new_token(1, None)).await.unwrap();
        repo.create(new_token(1, None)).await.unwrap();

        assert!(repo.delete(first.id).await.unwrap());
        assert!(!repo.delete(first.id).await.unwrap());
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_delete_for_user() {
        let repo = InMemoryTokenRepository::new();
        repo.create(new_token(1, None)).await.unwrap();
        repo.create(new_token(1, None)).await.unwrap();
        repo.create(new_token(2, None)).await.unwrap();

        assert_eq!(repo.delete_for_user(1).await.unwrap(), 2);
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_touch_and_delete_expired() {
        let repo = InMemoryTokenRepository::new();
        let now = Utc::now();
        let stale = repo
            .create(new_token(1, Some(now - Duration::minutes(1))))
            .await
            .unwrap();
        let fresh = repo.create(new_token(1, None)).await.unwrap();

        repo.touch(fresh.id, now).await.unwrap();
        let touched = repo.find_by_id(fresh.id).await.unwrap().unwrap();
        assert_eq!(touched.last_used_at, Some(now));

        assert_eq!(repo.delete_expired(now).await.unwrap(), 1);
        assert!(repo.find_by_id(stale.id).await.unwrap().is_none());
    }
}
