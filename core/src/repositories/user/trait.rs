//! User repository trait defining the interface for user data persistence.
//!
//! The trait is async-first and every method returns a `DomainResult`, so that
//! store failures surface as `DomainError::Internal` rather than panics.

use async_trait::async_trait;

use crate::domain::entities::user::{NewUser, User};
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// Implementations own id assignment and the `created_at`/`updated_at`
/// timestamps, and must enforce email uniqueness atomically (a unique index or a
/// check under a write lock), reporting collisions as `DomainError::email_taken()`.
///
/// # Example
/// ```no_run
/// # use uh_core::repositories::UserRepository;
/// # async fn example(repo: &impl UserRepository) -> Result<(), Box<dyn std::error::Error>> {
/// if let Some(user) = repo.find_by_email("jane@x.com").await? {
///     println!("User {} registered at {}", user.id, user.created_at);
/// }
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users, ordered by id
    async fn list(&self) -> Result<Vec<User>, DomainError>;

    /// Find a user by id
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with that id
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError>;

    /// Find a user by email, ignoring case
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Whether `email` belongs to a user other than `except_id`
    async fn email_taken(&self, email: &str, except_id: Option<i64>) -> Result<bool, DomainError>;

    /// Insert a new user, returning it with its assigned id and timestamps
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;

    /// Persist name, email, password hash and verification time of an existing user
    ///
    /// Returns `DomainError::NotFound` if the row no longer exists.
    async fn update(&self, user: User) -> Result<User, DomainError>;

    /// Delete a user
    ///
    /// # Returns
    /// * `Ok(true)` - User was deleted
    /// * `Ok(false)` - User not found
    async fn delete(&self, id: i64) -> Result<bool, DomainError>;

    /// Check that the backing store is reachable
    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
