//! Session route handlers
//!
//! - `POST /login` issues a bearer token
//! - `POST /logout` revokes the presented token
//! - `GET /user` returns the authenticated user

pub mod login;
pub mod logout;
pub mod me;

pub use login::login;
pub use logout::logout;
pub use me::current_user;
