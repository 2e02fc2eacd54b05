//! Token service module for personal access tokens
//!
//! This module handles all token-related operations including:
//! - Opaque token generation and SHA-256 digesting of the secret
//! - Resolving a bearer string back to its stored token
//! - Revocation, single or per user
//! - Background cleanup of expired tokens

mod cleanup;
mod config;
mod service;


pub use cleanup::{CleanupResult, TokenCleanupConfig, TokenCleanupService};
pub use config::TokenServiceConfig;
pub use service::TokenService;
