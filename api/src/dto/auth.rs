//! Session bodies

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use uh_core::domain::value_objects::LoginResult;
use uh_core::services::Credentials;

use super::{non_blank, trimmed, UserResponse};
use crate::handlers::ApiError;

/// Body of `POST /login`
#[derive(Clone, Default, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(
        required(message = "The email field is required."),
        email(message = "The email field must be a valid email address.")
    )]
    #[schema(value_type = String, example = "jane@example.com")]
    pub email: Option<String>,

    #[validate(required(message = "The password field is required."))]
    #[schema(value_type = String, format = Password, example = "password123")]
    pub password: Option<String>,
}

impl LoginRequest {
    pub fn into_credentials(self) -> Result<Credentials, ApiError> {
        let request = Self {
            email: trimmed(self.email),
            password: non_blank(self.password),
        };
        request.validate().map_err(ApiError::from_validation)?;

        Ok(Credentials {
            email: request.email.unwrap_or_default(),
            password: request.password.unwrap_or_default(),
        })
    }
}

/// `{"user": {...}, "token": "{id}|{secret}"}`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub user: UserResponse,
    /// Plain-text bearer token, shown only once
    #[schema(example = "1|8fJ2kQm4XzP0aLw7Vn3cRt6YbH9sDe1GuKo5Ni2M")]
    pub token: String,
}

impl From<LoginResult> for LoginResponse {
    fn from(result: LoginResult) -> Self {
        Self {
            token: result.token.to_string(),
            user: result.user.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LogoutResponse {
    pub message: String,
    pub revoked: bool,
}
