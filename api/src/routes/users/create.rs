use actix_web::{web, HttpResponse};

use uh_core::repositories::{TokenRepository, UserRepository};
use uh_shared::ErrorResponse;

use crate::dto::{CreateUserRequest, UserResponse};
use crate::handlers::ApiError;
use crate::routes::AppState;

/// Register a user
///
/// The password is stored as a bcrypt hash and never returned.
#[utoipa::path(
    post,
    path = "/user/create",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 422, description = "Invalid fields or email already taken", body = ErrorResponse)
    )
)]
pub async fn create_user<U, T>(
    state: web::Data<AppState<U, T>>,
    request: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
{
    let command = request.into_inner().into_command()?;
    let user = state.user_service.create(command).await?;

    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}
