use actix_web::{web, HttpResponse};

use uh_core::repositories::{TokenRepository, UserRepository};

use crate::dto::UserResponse;
use crate::handlers::ApiError;
use crate::routes::AppState;

/// List all users
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    responses(
        (status = 200, description = "Every user, oldest first", body = [UserResponse])
    )
)]
pub async fn list_users<U, T>(state: web::Data<AppState<U, T>>) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
{
    let users: Vec<UserResponse> = state
        .user_service
        .list()
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(users))
}
