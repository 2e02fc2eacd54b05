//! HTTP surface of the Userhub backend
//!
//! Exposed as a library so the integration tests can build the same `App`
//! the binary serves.

pub mod app;
pub mod config;
pub mod docs;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::create_app;
pub use routes::AppState;
