//! Request and response bodies
//!
//! Requests are normalised before validation: strings are trimmed (passwords
//! excepted) and blank strings are treated as missing.

pub mod auth;
pub mod user;

pub use auth::{LoginRequest, LoginResponse, LogoutResponse};
pub use user::{
    CreateUserRequest, MessageResponse, PasswordUpdatedResponse, UpdatePasswordRequest,
    UpdateUserRequest, UserResponse,
};

/// Trims surrounding whitespace; blank becomes `None`
pub(crate) fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Blank becomes `None`; anything else is kept exactly as sent
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
