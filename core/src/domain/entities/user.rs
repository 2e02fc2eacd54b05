//! User entity representing a registered account.

use chrono::{DateTime, Utc};

/// User entity as stored by the persistence layer
///
/// The password is only ever held as a bcrypt hash. The entity deliberately does
/// not implement `Serialize`; the HTTP layer maps it to a response type that has
/// no password field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Identifier assigned by the persistence layer on insert
    pub id: i64,

    /// Display name (1..=255 chars)
    pub name: String,

    /// Email address, unique across all users
    pub email: String,

    /// bcrypt hash of the password
    pub password_hash: String,

    /// When the email address was verified, if ever
    pub email_verified_at: Option<DateTime<Utc>>,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Replaces name, email and password hash in one step
    pub fn apply_profile(&mut self, name: String, email: String, password_hash: String) {
        self.name = name;
        self.email = email;
        self.password_hash = password_hash;
    }

    /// Replaces only the password hash
    pub fn change_password(&mut self, password_hash: String) {
        self.password_hash = password_hash;
    }

    /// Case-insensitive email comparison, matching the store's collation
    pub fn has_email(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email.trim())
    }
}

/// A user that has not been persisted yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

impl NewUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
        }
    }

    /// Materialise the row the store will hold once it assigns `id`
    pub fn into_user(self, id: i64, now: DateTime<Utc>) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
            email_verified_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}
