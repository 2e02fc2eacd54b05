//! OpenAPI document served at `/api/documentation`

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use uh_shared::ErrorResponse;

use crate::dto::{
    CreateUserRequest, LoginRequest, LoginResponse, LogoutResponse, MessageResponse,
    PasswordUpdatedResponse, UpdatePasswordRequest, UpdateUserRequest, UserResponse,
};

/// Name of the security scheme referenced by the authenticated routes
pub const BEARER_SCHEME: &str = "bearer_token";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Userhub API",
        description = "User management with bearer-token sessions. Tokens look like `{id}|{secret}` and come from `POST /login`."
    ),
    paths(
        crate::app::health_check,
        crate::routes::auth::login::login,
        crate::routes::auth::logout::logout,
        crate::routes::auth::me::current_user,
        crate::routes::users::list::list_users,
        crate::routes::users::show::show_user,
        crate::routes::users::create::create_user,
        crate::routes::users::update::update_user,
        crate::routes::users::update_password::update_password,
        crate::routes::users::delete::delete_user,
    ),
    components(schemas(
        UserResponse,
        CreateUserRequest,
        UpdateUserRequest,
        UpdatePasswordRequest,
        LoginRequest,
        LoginResponse,
        LogoutResponse,
        MessageResponse,
        PasswordUpdatedResponse,
        ErrorResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "users", description = "User resource"),
        (name = "session", description = "Login, logout and the current user"),
        (name = "system", description = "Service status")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                BEARER_SCHEME,
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}
