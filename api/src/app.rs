//! Application factory
//!
//! Builds the actix-web `App` with routes, middleware and extractor
//! configuration. Used by the binary and by the HTTP tests.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    http::StatusCode,
    middleware::Logger,
    web, App, Error, HttpRequest, HttpResponse, ResponseError,
};
use std::sync::Arc;
use utoipa::OpenApi;

use uh_core::repositories::{TokenRepository, UserRepository};
use uh_shared::AppConfig;

use crate::docs::ApiDoc;
use crate::handlers::{json_error_handler, path_error_handler, ApiError};
use crate::middleware::{create_cors, SessionResolver, TokenAuth};
use crate::routes::auth::{current_user, login, logout};
use crate::routes::users::{
    create_user, delete_user, list_users, show_user, update_password, update_user,
};
use crate::routes::AppState;

/// Create and configure the application with all dependencies
pub fn create_app<U, T>(
    app_state: web::Data<AppState<U, T>>,
    config: &AppConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
{
    let resolver: Arc<dyn SessionResolver> = app_state.session_service.clone();

    let json_config = web::JsonConfig::default()
        .limit(config.server.max_payload_size)
        .error_handler(json_error_handler);
    let path_config = web::PathConfig::default().error_handler(path_error_handler);

    App::new()
        .app_data(app_state)
        .app_data(web::Data::from(resolver))
        .app_data(json_config)
        .app_data(path_config)
        .wrap(create_cors(&config.cors))
        .wrap(Logger::default())
        .route("/health", web::get().to(health_check::<U, T>))
        .route("/api/documentation", web::get().to(api_documentation))
        // Sessions
        .service(
            web::resource("/login")
                .route(web::post().to(login::<U, T>))
                .default_service(web::to(method_not_allowed)),
        )
        .service(
            web::resource("/logout")
                .route(web::post().to(logout::<U, T>).wrap(TokenAuth::new()))
                .default_service(web::to(method_not_allowed)),
        )
        .service(
            web::resource("/user")
                .route(web::get().to(current_user).wrap(TokenAuth::new()))
                .default_service(web::to(method_not_allowed)),
        )
        // Users
        .service(
            web::resource("/user/create")
                .route(web::post().to(create_user::<U, T>))
                .default_service(web::to(method_not_allowed)),
        )
        .service(
            web::resource("/users")
                .route(web::get().to(list_users::<U, T>))
                .default_service(web::to(method_not_allowed)),
        )
        .service(
            web::resource("/users/{id}")
                .route(web::get().to(show_user::<U, T>))
                .route(web::put().to(update_user::<U, T>).wrap(TokenAuth::new()))
                .route(web::delete().to(delete_user::<U, T>).wrap(TokenAuth::new()))
                .default_service(web::to(method_not_allowed)),
        )
        .service(
            web::resource("/users/{id}/password")
                .route(web::patch().to(update_password::<U, T>).wrap(TokenAuth::new()))
                .default_service(web::to(method_not_allowed)),
        )
        .default_service(web::to(not_found))
}

/// Service and database status
#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses(
        (status = 200, description = "Service and database are up"),
        (status = 503, description = "Database unreachable")
    )
)]
pub(crate) async fn health_check<U, T>(state: web::Data<AppState<U, T>>) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
{
    let (status, database) = match state.user_service.ping().await {
        Ok(()) => (StatusCode::OK, "up"),
        Err(e) => {
            log::warn!("Health check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "down")
        }
    };

    HttpResponse::build(status).json(serde_json::json!({
        "status": if status.is_success() { "healthy" } else { "unhealthy" },
        "service": "userhub",
        "version": env!("CARGO_PKG_VERSION"),
        "database": database,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// OpenAPI 3 document for every route
async fn api_documentation() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Default 404 handler
async fn not_found(req: HttpRequest) -> HttpResponse {
    ApiError::RouteNotFound(req.path().trim_start_matches('/').to_string()).error_response()
}

/// Known path, unsupported method
async fn method_not_allowed(req: HttpRequest) -> HttpResponse {
    ApiError::MethodNotAllowed {
        method: req.method().to_string(),
        path: req.path().trim_start_matches('/').to_string(),
    }
    .error_response()
}
