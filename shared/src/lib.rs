//! Shared configuration and common types for the Userhub server
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types
//! - The JSON error body returned by every endpoint
//! - Field-level validation error collection
//! - Log masking helpers

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CorsConfig, DatabaseConfig, Environment, LogFormat, LoggingConfig,
    PasswordConfig, ServerConfig, ThrottleConfig, TokenConfig,
};
pub use errors::ErrorResponse;
pub use utils::{mask_email, validation};
