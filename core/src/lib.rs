//! # Userhub Core
//!
//! Core business logic and domain layer for the Userhub backend.
//! This crate contains domain entities, business services, repository interfaces,
//! and error types that form the foundation of the application architecture.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{NewAccessToken, NewUser, PersonalAccessToken, PlainTextToken, User};
pub use domain::value_objects::{AuthenticatedSession, LoginResult};
pub use errors::{messages, AuthError, DomainError, DomainResult, TokenError};
pub use repositories::{
    InMemoryTokenRepository, InMemoryUserRepository, TokenRepository, UserRepository,
};
pub use services::{
    BcryptHasher, CreateUser, Credentials, InMemoryLoginThrottle, LoginThrottle, PasswordHasher,
    SessionService, SessionServiceConfig, TokenService, TokenServiceConfig, UpdateUser,
    UserService,
};
