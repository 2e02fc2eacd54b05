use actix_web::{web, HttpRequest, HttpResponse};

use uh_core::repositories::{TokenRepository, UserRepository};
use uh_shared::ErrorResponse;

use crate::dto::auth::{LoginRequest, LoginResponse};
use crate::handlers::ApiError;
use crate::routes::{client_ip, AppState};

/// Exchange email and password for a bearer token
#[utoipa::path(
    post,
    path = "/login",
    tag = "session",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in; the token is shown only here", body = LoginResponse),
        (status = 401, description = "Unknown email or wrong password", body = ErrorResponse),
        (status = 422, description = "Missing or malformed fields", body = ErrorResponse),
        (status = 429, description = "Too many failed attempts for this email and address", body = ErrorResponse)
    )
)]
pub async fn login<U, T>(
    req: HttpRequest,
    state: web::Data<AppState<U, T>>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
{
    let credentials = request.into_inner().into_credentials()?;
    let ip = client_ip(&req);

    let result = state.session_service.login(&credentials, &ip).await?;
    log::info!("User {} logged in from {}", result.user.id, ip);

    Ok(HttpResponse::Ok().json(LoginResponse::from(result)))
}
