use actix_web::{web, HttpResponse};

use uh_core::errors::messages;
use uh_core::repositories::{TokenRepository, UserRepository};
use uh_shared::ErrorResponse;

use crate::dto::{PasswordUpdatedResponse, UpdatePasswordRequest};
use crate::handlers::ApiError;
use crate::middleware::auth::AuthContext;
use crate::routes::AppState;

/// Change only a user's password
#[utoipa::path(
    patch,
    path = "/users/{id}/password",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    request_body = UpdatePasswordRequest,
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "Password changed", body = PasswordUpdatedResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "User with that ID does not exist", body = ErrorResponse),
        (status = 422, description = "Password missing or too short", body = ErrorResponse)
    )
)]
pub async fn update_password<U, T>(
    state: web::Data<AppState<U, T>>,
    auth: AuthContext,
    path: web::Path<i64>,
    request: web::Json<UpdatePasswordRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
{
    let id = path.into_inner();
    state.user_service.get(id).await?;
    let password = request.into_inner().into_password()?;

    let user = state.user_service.update_password(id, &password).await?;
    log::info!("Password of user {} changed by user {}", id, auth.user_id());

    Ok(HttpResponse::Ok().json(PasswordUpdatedResponse {
        message: messages::PASSWORD_UPDATED.to_string(),
        user: user.into(),
    }))
}
