//! Boundary error mapping
//!
//! Every failure leaving a handler or middleware goes through [`ApiError`], which
//! renders the `{message, errors?}` body and picks the status code.

use actix_web::{
    error::{JsonPayloadError, PathError},
    http::{header, StatusCode},
    HttpRequest, HttpResponse, ResponseError,
};
use thiserror::Error;

use uh_core::errors::{messages, AuthError, DomainError, TokenError};
use uh_shared::{validation::ValidationErrors, ErrorResponse};

/// Errors returned by HTTP handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Request body or fields failed validation
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// Path parameter did not identify a user
    #[error("User not found")]
    UserNotFound,

    #[error("Unauthenticated")]
    Unauthenticated,

    #[error("The route {0} could not be found.")]
    RouteNotFound(String),

    #[error("The {method} method is not supported for route {path}.")]
    MethodNotAllowed { method: String, path: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Converts `validator` output into field errors in a stable field order
    pub fn from_validation(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by_key(|(field, _)| field_rank(field.as_ref()));

        let mut collected = ValidationErrors::new();
        for (field, field_errors) in fields {
            let field: &str = field.as_ref();
            for error in field_errors.iter() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("The {} field is invalid.", field.replace('_', " ")));
                collected.add(field, message);
            }
        }
        ApiError::Validation(collected)
    }

    /// Malformed or mistyped JSON bodies are reported as validation failures
    pub fn from_json_error(err: &JsonPayloadError) -> Self {
        let detail = match err {
            JsonPayloadError::ContentType => "The request body must be JSON.".to_string(),
            JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
                "The request body is too large.".to_string()
            }
            other => other.to_string(),
        };
        ApiError::Validation(ValidationErrors::single("body", detail))
    }

    fn body(&self) -> ErrorResponse {
        match self {
            ApiError::Domain(DomainError::Validation { errors }) | ApiError::Validation(errors) => {
                validation_body(errors)
            }
            ApiError::Domain(DomainError::NotFound { resource }) if resource == "User" => {
                ErrorResponse::new(messages::USER_NOT_FOUND)
            }
            ApiError::Domain(DomainError::NotFound { resource }) => {
                ErrorResponse::new(format!("{} not found", resource))
            }
            ApiError::UserNotFound => ErrorResponse::new(messages::USER_NOT_FOUND),
            ApiError::Domain(DomainError::Auth(AuthError::InvalidCredentials)) => {
                ErrorResponse::new(messages::INVALID_CREDENTIALS)
            }
            ApiError::Domain(DomainError::Auth(AuthError::TooManyAttempts { seconds })) => {
                ErrorResponse::new(messages::too_many_attempts(*seconds))
            }
            ApiError::Domain(err) if err.is_authentication_failure() => {
                ErrorResponse::new(messages::UNAUTHENTICATED)
            }
            ApiError::Unauthenticated => ErrorResponse::new(messages::UNAUTHENTICATED),
            ApiError::RouteNotFound(_) | ApiError::MethodNotAllowed { .. } => {
                ErrorResponse::new(self.to_string())
            }
            ApiError::Domain(_) | ApiError::Internal(_) => {
                ErrorResponse::new(messages::INTERNAL_ERROR)
            }
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Domain(DomainError::Validation { .. }) | ApiError::Validation(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::Domain(DomainError::NotFound { .. })
            | ApiError::UserNotFound
            | ApiError::RouteNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Domain(DomainError::Auth(AuthError::InvalidCredentials)) => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::Domain(DomainError::Auth(AuthError::TooManyAttempts { .. })) => {
                StatusCode::TOO_MANY_REQUESTS
            }
            ApiError::Domain(err) if err.is_authentication_failure() => StatusCode::UNAUTHORIZED,
            ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Domain(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("Request failed: {}", self);
        } else {
            log::debug!("Request rejected with {}: {}", status.as_u16(), self);
        }

        let mut response = HttpResponse::build(status);
        if let ApiError::Domain(DomainError::Auth(AuthError::TooManyAttempts { seconds })) = self {
            response.insert_header((header::RETRY_AFTER, seconds.to_string()));
        }
        if status == StatusCode::UNAUTHORIZED && !matches!(self, ApiError::Domain(DomainError::Auth(_))) {
            response.insert_header((header::WWW_AUTHENTICATE, "Bearer"));
        }
        response.json(self.body())
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        ApiError::Domain(err.into())
    }
}

/// Error handler for `web::JsonConfig`
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::from_json_error(&err).into()
}

/// Error handler for `web::PathConfig`; a non-numeric id names no user
pub fn path_error_handler(_err: PathError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::UserNotFound.into()
}

/// `"The name field is required. (and 2 more errors)"`
fn validation_body(errors: &ValidationErrors) -> ErrorResponse {
    let first = errors.first_message().unwrap_or(messages::VALIDATION_FAILED);
    let message = match errors.errors().len() {
        0 | 1 => first.to_string(),
        2 => format!("{} (and 1 more error)", first),
        n => format!("{} (and {} more errors)", first, n - 1),
    };
    ErrorResponse::with_errors(message, errors.to_field_errors())
}

fn field_rank(field: &str) -> (usize, String) {
    const ORDER: [&str; 3] = ["name", "email", "password"];
    let rank = ORDER.iter().position(|f| *f == field).unwrap_or(ORDER.len());
    (rank, field.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_json(err: ApiError) -> serde_json::Value {
        let response = err.error_response();
        let bytes = to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::from(DomainError::email_taken()).status_code(), 422);
        assert_eq!(ApiError::from(DomainError::user_not_found()).status_code(), 404);
        assert_eq!(ApiError::UserNotFound.status_code(), 404);
        assert_eq!(ApiError::Unauthenticated.status_code(), 401);
        assert_eq!(ApiError::from(TokenError::Expired).status_code(), 401);
        assert_eq!(
            ApiError::from(DomainError::from(AuthError::InvalidCredentials)).status_code(),
            401
        );
        assert_eq!(
            ApiError::from(DomainError::from(AuthError::TooManyAttempts { seconds: 5 })).status_code(),
            429
        );
        assert_eq!(ApiError::from(DomainError::internal("boom")).status_code(), 500);
        assert_eq!(ApiError::from(TokenError::GenerationFailed).status_code(), 500);
    }

    #[actix_web::test]
    async fn test_internal_details_are_hidden() {
        let body = body_json(ApiError::from(DomainError::internal("db password wrong"))).await;
        assert_eq!(body["message"], "Server Error");
        assert!(body.get("errors").is_none());
    }

    #[actix_web::test]
    async fn test_validation_body_summarises_extra_errors() {
        let mut errors = ValidationErrors::new();
        errors.add("name", "The name field is required.");
        errors.add("email", "The email field is required.");
        errors.add("password", "The password field is required.");

        let body = body_json(ApiError::Validation(errors)).await;
        assert_eq!(body["message"], "The name field is required. (and 2 more errors)");
        assert_eq!(body["errors"]["email"][0], "The email field is required.");
    }

    #[actix_web::test]
    async fn test_throttle_sets_retry_after() {
        let response =
            ApiError::from(DomainError::from(AuthError::TooManyAttempts { seconds: 17 })).error_response();
        assert_eq!(response.headers().get(header::RETRY_AFTER).unwrap(), "17");
    }

    #[test]
    fn test_field_rank_orders_known_fields_first() {
        let mut fields = vec!["password", "zeta", "email", "name"];
        fields.sort_by_key(|f| field_rank(f));
        assert_eq!(fields, vec!["name", "email", "password", "zeta"]);
    }
}
