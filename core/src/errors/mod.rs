//! Domain-specific error types and error handling.

mod types;

pub use types::{messages, AuthError, TokenError};
pub use uh_shared::validation::ValidationErrors;

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    /// One or more input fields were rejected
    #[error("Validation error: {errors}")]
    Validation { errors: ValidationErrors },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    /// No valid bearer token accompanied the request
    #[error("Unauthenticated")]
    Unauthenticated,

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    /// Validation failure on a single field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        DomainError::Validation {
            errors: ValidationErrors::single(field, message),
        }
    }

    /// The email is already used by another account
    pub fn email_taken() -> Self {
        Self::validation("email", messages::EMAIL_TAKEN)
    }

    pub fn user_not_found() -> Self {
        DomainError::NotFound {
            resource: "User".to_string(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal {
            message: message.into(),
        }
    }

    /// Whether the request should be answered with 401
    pub fn is_authentication_failure(&self) -> bool {
        match self {
            DomainError::Unauthenticated => true,
            DomainError::Token(err) => !matches!(err, TokenError::GenerationFailed),
            _ => false,
        }
    }
}

impl From<ValidationErrors> for DomainError {
    fn from(errors: ValidationErrors) -> Self {
        DomainError::Validation { errors }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
