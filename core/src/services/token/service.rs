//! Main token service implementation

use chrono::{Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::distributions::Alphanumeric;
use rand::Rng;
use sha2::{Digest, Sha256};
use std::sync::Arc;

use crate::domain::entities::token::{
    NewAccessToken, PersonalAccessToken, PlainTextToken, TOKEN_SECRET_LENGTH,
};
use crate::errors::{DomainError, TokenError};
use crate::repositories::TokenRepository;

use super::config::TokenServiceConfig;

/// Service for issuing and resolving personal access tokens
pub struct TokenService<R: TokenRepository> {
    pub(crate) repository: Arc<R>,
    config: TokenServiceConfig,
}

impl<R: TokenRepository> TokenService<R> {
    pub fn new(repository: Arc<R>, config: TokenServiceConfig) -> Self {
        Self { repository, config }
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    /// Issues a new token for a user
    ///
    /// # Returns
    ///
    /// The stored row and the plain-text credential. The plain text is not
    /// recoverable afterwards; only its digest is persisted.
    pub async fn issue(
        &self,
        user_id: i64,
        name: &str,
    ) -> Result<(PersonalAccessToken, PlainTextToken), DomainError> {
        let secret = Self::generate_secret();
        if secret.len() != TOKEN_SECRET_LENGTH {
            return Err(TokenError::GenerationFailed.into());
        }

        let expires_at = self
            .config
            .expiry_minutes
            .map(|minutes| Utc::now() + Duration::minutes(minutes));

        let token = self
            .repository
            .create(NewAccessToken {
                user_id,
                name: name.to_string(),
                token_hash: Self::hash_secret(&secret),
                expires_at,
            })
            .await?;

        let plain = PlainTextToken::new(token.id, secret);
        Ok((token, plain))
    }

    /// Resolves a bearer string of the form `{id}|{secret}` to its stored token
    ///
    /// # Errors
    ///
    /// * `TokenError::Malformed` - Not of the expected form
    /// * `TokenError::NotFound` - Unknown or revoked id
    /// * `TokenError::Mismatch` - Secret does not match the stored digest
    /// * `TokenError::Expired` - Past its `expires_at`
    pub async fn resolve(&self, bearer: &str) -> Result<PersonalAccessToken, DomainError> {
        let plain = PlainTextToken::parse(bearer).ok_or(TokenError::Malformed)?;

        let token = self
            .repository
            .find_by_id(plain.id)
            .await?
            .ok_or(TokenError::NotFound)?;

        let presented = Self::hash_secret(&plain.secret);
        if !constant_time_eq(presented.as_bytes(), token.token_hash.as_bytes()) {
            return Err(TokenError::Mismatch.into());
        }

        if token.is_expired() {
            return Err(TokenError::Expired.into());
        }

        Ok(token)
    }

    /// Stamps `last_used_at` with the current time
    pub async fn touch(&self, token: &mut PersonalAccessToken) -> Result<(), DomainError> {
        let now = Utc::now();
        self.repository.touch(token.id, now).await?;
        token.last_used_at = Some(now);
        Ok(())
    }

    /// Deletes a single token; `Ok(false)` if it was already gone
    pub async fn revoke(&self, token_id: i64) -> Result<bool, DomainError> {
        self.repository.delete(token_id).await
    }

    /// Deletes every token of a user
    pub async fn revoke_all(&self, user_id: i64) -> Result<usize, DomainError> {
        self.repository.delete_for_user(user_id).await
    }

    /// Deletes tokens that are past their expiry
    pub async fn purge_expired(&self) -> Result<usize, DomainError> {
        self.repository.delete_expired(Utc::now()).await
    }

    /// Hex-encoded SHA-256 digest of a token secret
    pub fn hash_secret(secret: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(secret.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Random alphanumeric secret of `TOKEN_SECRET_LENGTH` characters
    pub fn generate_secret() -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_SECRET_LENGTH)
            .map(char::from)
            .collect()
    }
}
