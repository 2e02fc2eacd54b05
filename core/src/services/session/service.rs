//! Main session service implementation

use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use uh_shared::mask_email;

use crate::domain::value_objects::{AuthenticatedSession, LoginResult};
use crate::errors::{AuthError, DomainError};
use crate::repositories::{TokenRepository, UserRepository};
use crate::services::password::PasswordHasher;
use crate::services::token::TokenService;

use super::config::SessionServiceConfig;
use super::throttle::{throttle_key, LoginThrottle};

/// Login credentials
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &mask_email(&self.email))
            .field("password", &"[redacted]")
            .finish()
    }
}

/// Service for login, logout and bearer token authentication
pub struct SessionService<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    users: Arc<U>,
    tokens: Arc<TokenService<T>>,
    hasher: Arc<dyn PasswordHasher>,
    throttle: Arc<dyn LoginThrottle>,
    config: SessionServiceConfig,
    /// Hash checked against when the email is unknown, so both failures cost one bcrypt run
    decoy_hash: OnceCell<String>,
}

const DECOY_PASSWORD: &str = "userhub-decoy-password";

impl<U, T> SessionService<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    pub fn new(
        users: Arc<U>,
        tokens: Arc<TokenService<T>>,
        hasher: Arc<dyn PasswordHasher>,
        throttle: Arc<dyn LoginThrottle>,
        config: SessionServiceConfig,
    ) -> Self {
        Self {
            users,
            tokens,
            hasher,
            throttle,
            config,
            decoy_hash: OnceCell::new(),
        }
    }

    /// Checks credentials and issues a new token
    ///
    /// # Errors
    ///
    /// * `AuthError::TooManyAttempts` - The email/address pair is locked out
    /// * `AuthError::InvalidCredentials` - Unknown email or wrong password
    pub async fn login(
        &self,
        credentials: &Credentials,
        client_ip: &str,
    ) -> Result<LoginResult, DomainError> {
        let key = throttle_key(&credentials.email, client_ip);

        if let Some(seconds) = self.throttle.available_in(&key).await {
            warn!(
                email = %mask_email(&credentials.email),
                client_ip,
                seconds,
                "Login locked out"
            );
            return Err(AuthError::TooManyAttempts { seconds }.into());
        }

        let user = match self.users.find_by_email(&credentials.email).await? {
            Some(user) if self.hasher.verify(&credentials.password, &user.password_hash)? => user,
            found => {
                if found.is_none() {
                    self.verify_decoy(&credentials.password).await?;
                }
                let attempts = self.throttle.hit(&key).await;
                warn!(
                    email = %mask_email(&credentials.email),
                    client_ip,
                    attempts,
                    "Login failed"
                );
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        self.throttle.clear(&key).await;

        let (token, plain) = self.tokens.issue(user.id, &self.config.token_name).await?;
        info!(user_id = user.id, token_id = token.id, "User logged in");

        Ok(LoginResult { user, token: plain })
    }

    async fn verify_decoy(&self, password: &str) -> Result<(), DomainError> {
        let hash = self
            .decoy_hash
            .get_or_try_init(|| async { self.hasher.hash(DECOY_PASSWORD) })
            .await?;
        self.hasher.verify(password, hash)?;
        Ok(())
    }

    /// Revokes the token that authenticated this session
    ///
    /// Returns whether a row was deleted; a token removed concurrently is not an error.
    pub async fn logout(&self, session: &AuthenticatedSession) -> Result<bool, DomainError> {
        let deleted = self.tokens.revoke(session.token_id()).await?;
        info!(
            user_id = session.user_id(),
            token_id = session.token_id(),
            deleted,
            "User logged out"
        );
        Ok(deleted)
    }

    /// Resolves a bearer token to its owner and records the use
    ///
    /// Token failures are returned as `DomainError::Token`; a token whose owner
    /// no longer exists yields `DomainError::Unauthenticated`.
    pub async fn authenticate(&self, bearer: &str) -> Result<AuthenticatedSession, DomainError> {
        let mut token = self.tokens.resolve(bearer).await?;

        let Some(user) = self.users.find_by_id(token.user_id).await? else {
            debug!(token_id = token.id, user_id = token.user_id, "Token owner no longer exists");
            return Err(DomainError::Unauthenticated);
        };

        self.tokens.touch(&mut token).await?;

        Ok(AuthenticatedSession { user, token })
    }
}
