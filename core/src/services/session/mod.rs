//! Session service module
//!
//! Email/password login issuing personal access tokens, logout of the
//! presented token, bearer resolution for protected routes, and failed-login
//! throttling.

mod config;
mod service;
mod throttle;


pub use config::SessionServiceConfig;
pub use service::{Credentials, SessionService};
pub use throttle::{throttle_key, InMemoryLoginThrottle, LoginThrottle};
