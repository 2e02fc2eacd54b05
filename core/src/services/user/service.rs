//! Main user service implementation

use std::sync::Arc;
use tracing::{debug, info};

use uh_shared::mask_email;

use crate::domain::entities::user::{NewUser, User};
use crate::errors::DomainError;
use crate::repositories::{TokenRepository, UserRepository};
use crate::services::password::PasswordHasher;
use crate::services::token::TokenService;

/// Input for creating a user
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Input for a full update; every field is replaced
#[derive(Debug, Clone)]
pub struct UpdateUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Service for managing user records
pub struct UserService<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    users: Arc<U>,
    tokens: Arc<TokenService<T>>,
    hasher: Arc<dyn PasswordHasher>,
}

impl<U, T> UserService<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    pub fn new(users: Arc<U>, tokens: Arc<TokenService<T>>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self {
            users,
            tokens,
            hasher,
        }
    }

    /// Checks that the user store is reachable
    pub async fn ping(&self) -> Result<(), DomainError> {
        self.users.ping().await
    }

    /// All users, ordered by id
    pub async fn list(&self) -> Result<Vec<User>, DomainError> {
        self.users.list().await
    }

    /// # Errors
    ///
    /// `DomainError::NotFound` if no user has this id
    pub async fn get(&self, id: i64) -> Result<User, DomainError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(DomainError::user_not_found)
    }

    /// Creates a user with a freshly hashed password
    ///
    /// The uniqueness pre-check gives a clean error in the common case; the
    /// repository re-checks atomically, so a concurrent duplicate still fails.
    pub async fn create(&self, input: CreateUser) -> Result<User, DomainError> {
        if self.users.email_taken(&input.email, None).await? {
            return Err(DomainError::email_taken());
        }

        let password_hash = self.hasher.hash(&input.password)?;
        let user = self
            .users
            .create(NewUser::new(input.name, input.email, password_hash))
            .await?;

        info!(user_id = user.id, email = %mask_email(&user.email), "User created");
        Ok(user)
    }

    /// Replaces name, email and password of an existing user
    pub async fn update(&self, id: i64, input: UpdateUser) -> Result<User, DomainError> {
        let mut user = self.get(id).await?;

        if self.users.email_taken(&input.email, Some(id)).await? {
            return Err(DomainError::email_taken());
        }

        let password_hash = self.hasher.hash(&input.password)?;
        user.apply_profile(input.name, input.email, password_hash);
        let user = self.users.update(user).await?;

        info!(user_id = user.id, "User updated");
        Ok(user)
    }

    /// Replaces only the password; name and email are untouched
    pub async fn update_password(&self, id: i64, password: &str) -> Result<User, DomainError> {
        let mut user = self.get(id).await?;

        user.change_password(self.hasher.hash(password)?);
        let user = self.users.update(user).await?;

        info!(user_id = user.id, "User password updated");
        Ok(user)
    }

    /// Deletes a user together with all of their tokens
    pub async fn delete(&self, id: i64) -> Result<(), DomainError> {
        self.get(id).await?;

        let revoked = self.tokens.revoke_all(id).await?;
        debug!(user_id = id, revoked, "Revoked tokens of deleted user");

        if !self.users.delete(id).await? {
            return Err(DomainError::user_not_found());
        }

        info!(user_id = id, "User deleted");
        Ok(())
    }
}
