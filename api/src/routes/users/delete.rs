use actix_web::{web, HttpResponse};

use uh_core::errors::messages;
use uh_core::repositories::{TokenRepository, UserRepository};
use uh_shared::ErrorResponse;

use crate::dto::MessageResponse;
use crate::handlers::ApiError;
use crate::middleware::auth::AuthContext;
use crate::routes::AppState;

/// Delete a user and every token they hold
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "User with that ID does not exist", body = ErrorResponse)
    )
)]
pub async fn delete_user<U, T>(
    state: web::Data<AppState<U, T>>,
    auth: AuthContext,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
{
    let id = path.into_inner();
    state.user_service.delete(id).await?;
    log::info!("User {} deleted by user {}", id, auth.user_id());

    Ok(HttpResponse::Ok().json(MessageResponse::new(messages::USER_DELETED)))
}
