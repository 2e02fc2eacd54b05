//! Domain entities representing core business objects.

pub mod token;
pub mod user;

// Re-export commonly used types
pub use token::{NewAccessToken, PersonalAccessToken, PlainTextToken, TOKEN_SECRET_LENGTH};
pub use user::{NewUser, User};
