//! Token repository trait defining the interface for personal access token persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::token::{NewAccessToken, PersonalAccessToken};
use crate::errors::DomainError;

/// Repository trait for PersonalAccessToken persistence operations
///
/// # Security Considerations
/// - Only the digest of the token secret is ever stored
/// - Revocation deletes the row, so a revoked token cannot be found again
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Save a new token, returning it with its assigned id
    async fn create(&self, token: NewAccessToken) -> Result<PersonalAccessToken, DomainError>;

    /// Find a token by id
    async fn find_by_id(&self, id: i64) -> Result<Option<PersonalAccessToken>, DomainError>;

    /// Record that the token was just used
    async fn touch(&self, id: i64, used_at: DateTime<Utc>) -> Result<(), DomainError>;

    /// Delete a single token
    ///
    /// # Returns
    /// * `Ok(true)` - Token was deleted
    /// * `Ok(false)` - Token not found
    async fn delete(&self, id: i64) -> Result<bool, DomainError>;

    /// Delete every token of a user, returning how many were removed
    async fn delete_for_user(&self, user_id: i64) -> Result<usize, DomainError>;

    /// Delete tokens whose expiry is at or before `now`
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError>;
}
