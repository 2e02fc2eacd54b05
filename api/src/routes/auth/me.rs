use actix_web::HttpResponse;

use uh_shared::ErrorResponse;

use crate::dto::UserResponse;
use crate::middleware::auth::AuthContext;

/// The user the bearer token belongs to
#[utoipa::path(
    get,
    path = "/user",
    tag = "session",
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "Authenticated user", body = UserResponse),
        (status = 401, description = "Missing, unknown or expired token", body = ErrorResponse)
    )
)]
pub async fn current_user(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(UserResponse::from(auth.user))
}
