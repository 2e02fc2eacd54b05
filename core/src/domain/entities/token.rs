//! Personal access tokens used as bearer credentials.
//!
//! A token is handed to the client once, in the plain-text form `"{id}|{secret}"`.
//! Only the SHA-256 digest of the secret is stored.

use chrono::{DateTime, Utc};
use std::fmt;

/// Number of alphanumeric characters in a token secret
pub const TOKEN_SECRET_LENGTH: usize = 40;

/// Stored token row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalAccessToken {
    pub id: i64,

    /// Owner of the token
    pub user_id: i64,

    /// Label such as "api-token"
    pub name: String,

    /// Hex SHA-256 digest of the secret part
    pub token_hash: String,

    pub last_used_at: Option<DateTime<Utc>>,

    /// `None` means the token lives until revoked
    pub expires_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
}

impl PersonalAccessToken {
    /// Checks if the token has passed its expiry time
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expires_at, Some(expires_at) if now >= expires_at)
    }
}

/// A token that has not been persisted yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccessToken {
    pub user_id: i64,
    pub name: String,
    pub token_hash: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl NewAccessToken {
    pub fn into_token(self, id: i64, now: DateTime<Utc>) -> PersonalAccessToken {
        PersonalAccessToken {
            id,
            user_id: self.user_id,
            name: self.name,
            token_hash: self.token_hash,
            last_used_at: None,
            expires_at: self.expires_at,
            created_at: now,
        }
    }
}

/// The credential string given to clients: `"{id}|{secret}"`
#[derive(Clone, PartialEq, Eq)]
pub struct PlainTextToken {
    pub id: i64,
    pub secret: String,
}

impl PlainTextToken {
    pub fn new(id: i64, secret: impl Into<String>) -> Self {
        Self {
            id,
            secret: secret.into(),
        }
    }

    /// Parses `"{id}|{secret}"`; both parts must be non-empty and the id numeric
    pub fn parse(raw: &str) -> Option<Self> {
        let (id, secret) = raw.trim().split_once('|')?;
        let id = id.parse::<i64>().ok()?;
        if secret.is_empty() {
            return None;
        }
        Some(Self::new(id, secret))
    }
}

impl fmt::Display for PlainTextToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.id, self.secret)
    }
}

// Keeps secrets out of debug logs.
impl fmt::Debug for PlainTextToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlainTextToken")
            .field("id", &self.id)
            .field("secret", &"[redacted]")
            .finish()
    }
}
