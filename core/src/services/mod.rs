//! Business services containing domain logic and use cases.

pub mod password;
pub mod session;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use password::{BcryptHasher, PasswordHasher};
pub use session::{
    Credentials, InMemoryLoginThrottle, LoginThrottle, SessionService, SessionServiceConfig,
};
pub use token::{TokenService, TokenServiceConfig};
pub use user::{CreateUser, UpdateUser, UserService};
