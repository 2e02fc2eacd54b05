//! Bearer token authentication middleware for protecting API endpoints.
//!
//! The middleware reads `Authorization: Bearer {id}|{secret}`, resolves it
//! through the [`SessionResolver`] registered as app data, and injects an
//! [`AuthContext`] into the request. Any failure is answered with 401 before
//! the handler runs.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use async_trait::async_trait;
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};

use uh_core::{
    domain::entities::{PersonalAccessToken, User},
    domain::value_objects::AuthenticatedSession,
    errors::DomainError,
    repositories::{TokenRepository, UserRepository},
    services::SessionService,
};

use crate::handlers::ApiError;

/// Authenticated caller, available to handlers behind [`TokenAuth`]
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Owner of the presented token
    pub user: User,
    /// The token that authenticated this request
    pub token: PersonalAccessToken,
}

impl AuthContext {
    pub fn user_id(&self) -> i64 {
        self.user.id
    }

    pub fn token_id(&self) -> i64 {
        self.token.id
    }

    pub fn into_session(self) -> AuthenticatedSession {
        AuthenticatedSession {
            user: self.user,
            token: self.token,
        }
    }
}

impl From<AuthenticatedSession> for AuthContext {
    fn from(session: AuthenticatedSession) -> Self {
        Self {
            user: session.user,
            token: session.token,
        }
    }
}

/// Resolves a bearer string to a session, independent of repository types
#[async_trait]
pub trait SessionResolver: Send + Sync {
    async fn resolve(&self, bearer: &str) -> Result<AuthenticatedSession, DomainError>;
}

#[async_trait]
impl<U, T> SessionResolver for SessionService<U, T>
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
{
    async fn resolve(&self, bearer: &str) -> Result<AuthenticatedSession, DomainError> {
        self.authenticate(bearer).await
    }
}

/// Bearer token authentication middleware factory
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenAuth;

impl TokenAuth {
    pub fn new() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for TokenAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = TokenAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TokenAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// Bearer token authentication middleware service
pub struct TokenAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for TokenAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let Some(token) = extract_bearer_token(&req) else {
                log::debug!("Missing bearer token for {}", req.path());
                return Ok(reject(req, ApiError::Unauthenticated));
            };

            let Some(resolver) = req.app_data::<web::Data<dyn SessionResolver>>().cloned() else {
                log::error!("No session resolver registered");
                let err = ApiError::Internal("authentication is not configured".into());
                return Ok(reject(req, err));
            };

            let session = match resolver.resolve(&token).await {
                Ok(session) => session,
                Err(err) if err.is_authentication_failure() => {
                    log::debug!("Rejected bearer token: {}", err);
                    return Ok(reject(req, ApiError::Unauthenticated));
                }
                Err(err) => return Ok(reject(req, ApiError::from(err))),
            };

            req.extensions_mut().insert(AuthContext::from(session));

            service
                .call(req)
                .await
                .map(ServiceResponse::map_into_left_body)
        })
    }
}

/// Answers the request without reaching the handler
fn reject<B>(req: ServiceRequest, err: ApiError) -> ServiceResponse<EitherBody<B>> {
    req.into_response(err.error_response()).map_into_right_body()
}

/// Extracts the token from `Authorization: Bearer <token>`; the scheme is case-insensitive
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?.trim();
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthenticated.into());

        ready(result)
    }
}
