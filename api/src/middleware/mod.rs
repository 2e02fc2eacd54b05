pub mod auth;
pub mod cors;

pub use auth::{AuthContext, SessionResolver, TokenAuth};
pub use cors::create_cors;
