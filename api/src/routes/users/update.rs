use actix_web::{web, HttpResponse};

use uh_core::repositories::{TokenRepository, UserRepository};
use uh_shared::ErrorResponse;

use crate::dto::{UpdateUserRequest, UserResponse};
use crate::handlers::ApiError;
use crate::middleware::auth::AuthContext;
use crate::routes::AppState;

/// Replace a user's name, email and password
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    request_body = UpdateUserRequest,
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "User with that ID does not exist", body = ErrorResponse),
        (status = 422, description = "Invalid fields or email taken by another user", body = ErrorResponse)
    )
)]
pub async fn update_user<U, T>(
    state: web::Data<AppState<U, T>>,
    auth: AuthContext,
    path: web::Path<i64>,
    request: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
{
    let id = path.into_inner();
    // An unknown id is reported before any field errors.
    state.user_service.get(id).await?;
    let command = request.into_inner().into_command()?;

    let user = state.user_service.update(id, command).await?;
    log::info!("User {} updated by user {}", id, auth.user_id());

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}
