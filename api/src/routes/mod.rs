//! Route handlers and the shared application state

pub mod auth;
pub mod users;

use actix_web::HttpRequest;
use std::sync::Arc;

use uh_core::repositories::{TokenRepository, UserRepository};
use uh_core::services::{
    BcryptHasher, InMemoryLoginThrottle, SessionService, SessionServiceConfig, TokenService,
    TokenServiceConfig, UserService,
};
use uh_shared::AuthConfig;

/// Application state that holds shared services
pub struct AppState<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    pub user_service: Arc<UserService<U, T>>,
    pub session_service: Arc<SessionService<U, T>>,
    pub token_service: Arc<TokenService<T>>,
}

impl<U, T> AppState<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    /// Wires the services over the given repositories
    pub fn new(users: Arc<U>, tokens: Arc<T>, auth: &AuthConfig) -> Self {
        let token_service = Arc::new(TokenService::new(
            tokens,
            TokenServiceConfig::from(&auth.token),
        ));
        let hasher = Arc::new(BcryptHasher::new(auth.password.bcrypt_cost));
        let throttle = Arc::new(InMemoryLoginThrottle::new(&auth.throttle));

        let user_service = Arc::new(UserService::new(
            users.clone(),
            token_service.clone(),
            hasher.clone(),
        ));
        let session_service = Arc::new(SessionService::new(
            users,
            token_service.clone(),
            hasher,
            throttle,
            SessionServiceConfig::from(auth),
        ));

        Self {
            user_service,
            session_service,
            token_service,
        }
    }
}

/// Address used to key login throttling
pub(crate) fn client_ip(req: &HttpRequest) -> String {
    req.peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
