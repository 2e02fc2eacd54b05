//! User resource service
//!
//! Create, read, update and delete over the single user resource. Field shape
//! (presence, length, email format) is checked at the HTTP boundary; this service
//! enforces existence and email uniqueness and owns password hashing.

mod service;


pub use service::{CreateUser, UpdateUser, UserService};
