use crate::domain::entities::{PersonalAccessToken, PlainTextToken, User};

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user: User,
    /// Shown to the client exactly once
    pub token: PlainTextToken,
}

/// A bearer token resolved to its owner
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    pub user: User,
    pub token: PersonalAccessToken,
}

impl AuthenticatedSession {
    pub fn user_id(&self) -> i64 {
        self.user.id
    }

    pub fn token_id(&self) -> i64 {
        self.token.id
    }
}
