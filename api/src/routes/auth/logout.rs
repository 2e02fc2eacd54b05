use actix_web::{web, HttpResponse};

use uh_core::errors::messages;
use uh_core::repositories::{TokenRepository, UserRepository};
use uh_shared::ErrorResponse;

use crate::dto::auth::LogoutResponse;
use crate::handlers::ApiError;
use crate::middleware::auth::AuthContext;
use crate::routes::AppState;

/// Revoke the presented token
///
/// The user's other tokens stay valid.
#[utoipa::path(
    post,
    path = "/logout",
    tag = "session",
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "Token revoked", body = LogoutResponse),
        (status = 401, description = "Missing, unknown or expired token", body = ErrorResponse)
    )
)]
pub async fn logout<U, T>(
    state: web::Data<AppState<U, T>>,
    auth: AuthContext,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
{
    // The token authenticated this request, so it counts as revoked even if
    // a concurrent logout deleted it first.
    state.session_service.logout(&auth.into_session()).await?;

    Ok(HttpResponse::Ok().json(LogoutResponse {
        message: messages::LOGGED_OUT.to_string(),
        revoked: true,
    }))
}
