use actix_web::{web, HttpResponse};

use uh_core::repositories::{TokenRepository, UserRepository};
use uh_shared::ErrorResponse;

use crate::dto::UserResponse;
use crate::handlers::ApiError;
use crate::routes::AppState;

/// Show one user
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "The user", body = UserResponse),
        (status = 404, description = "User with that ID does not exist", body = ErrorResponse)
    )
)]
pub async fn show_user<U, T>(
    state: web::Data<AppState<U, T>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
{
    let user = state.user_service.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}
