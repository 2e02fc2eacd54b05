//! Value objects returned by the session service.

pub mod session;

pub use session::{AuthenticatedSession, LoginResult};
