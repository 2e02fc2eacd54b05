//! Authentication and token error types, plus the user-facing message catalogue.

use thiserror::Error;

/// Login failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown email or wrong password; the two are not distinguished
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Too many login attempts, retry in {seconds} seconds")]
    TooManyAttempts { seconds: i64 },
}

/// Bearer token failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Not of the form `{id}|{secret}`
    #[error("Malformed token")]
    Malformed,

    /// No stored token with that id, or it has been revoked
    #[error("Token not found")]
    NotFound,

    /// Secret does not match the stored digest
    #[error("Token secret mismatch")]
    Mismatch,

    #[error("Token expired")]
    Expired,

    #[error("Token generation failed")]
    GenerationFailed,
}

/// Messages returned to API clients
pub mod messages {
    pub const VALIDATION_FAILED: &str = "The given data was invalid.";
    pub const EMAIL_TAKEN: &str = "The email has already been taken.";
    pub const USER_NOT_FOUND: &str = "User with that ID does not exist";
    pub const UNAUTHENTICATED: &str = "Unauthenticated.";
    pub const INVALID_CREDENTIALS: &str = "Invalid login credentials";
    pub const INTERNAL_ERROR: &str = "Server Error";
    pub const USER_DELETED: &str = "User deleted successfully";
    pub const PASSWORD_UPDATED: &str = "Password updated successfully";
    pub const LOGGED_OUT: &str = "Successfully logged out";

    pub fn too_many_attempts(seconds: i64) -> String {
        format!("Too many login attempts. Please try again in {} seconds.", seconds)
    }
}
