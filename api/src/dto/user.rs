//! User resource bodies

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use uh_core::domain::entities::User;
use uh_core::services::{CreateUser, UpdateUser};

use super::{non_blank, trimmed};
use crate::handlers::ApiError;

/// Body of `POST /user/create`
#[derive(Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(
        required(message = "The name field is required."),
        length(max = 255, message = "The name field must not be greater than 255 characters.")
    )]
    #[schema(value_type = String, max_length = 255, example = "Jane Doe")]
    pub name: Option<String>,

    #[validate(
        required(message = "The email field is required."),
        email(message = "The email field must be a valid email address."),
        length(max = 255, message = "The email field must not be greater than 255 characters.")
    )]
    #[schema(value_type = String, max_length = 255, example = "jane@example.com")]
    pub email: Option<String>,

    #[validate(
        required(message = "The password field is required."),
        length(min = 8, message = "The password field must be at least 8 characters.")
    )]
    #[schema(value_type = String, format = Password, min_length = 8, example = "password123")]
    pub password: Option<String>,
}

impl CreateUserRequest {
    pub fn normalized(self) -> Self {
        Self {
            name: trimmed(self.name),
            email: trimmed(self.email),
            password: non_blank(self.password),
        }
    }

    /// Normalise, validate and convert into the service input
    pub fn into_command(self) -> Result<CreateUser, ApiError> {
        let request = self.normalized();
        request.validate().map_err(ApiError::from_validation)?;

        Ok(CreateUser {
            name: request.name.unwrap_or_default(),
            email: request.email.unwrap_or_default(),
            password: request.password.unwrap_or_default(),
        })
    }
}

/// Body of `PUT /users/{id}`; same rules as creation, every field replaced
#[derive(Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(
        required(message = "The name field is required."),
        length(max = 255, message = "The name field must not be greater than 255 characters.")
    )]
    #[schema(value_type = String, max_length = 255, example = "Jane Doe")]
    pub name: Option<String>,

    #[validate(
        required(message = "The email field is required."),
        email(message = "The email field must be a valid email address."),
        length(max = 255, message = "The email field must not be greater than 255 characters.")
    )]
    #[schema(value_type = String, max_length = 255, example = "jane@example.com")]
    pub email: Option<String>,

    #[validate(
        required(message = "The password field is required."),
        length(min = 8, message = "The password field must be at least 8 characters.")
    )]
    #[schema(value_type = String, format = Password, min_length = 8, example = "password123")]
    pub password: Option<String>,
}

impl UpdateUserRequest {
    pub fn normalized(self) -> Self {
        Self {
            name: trimmed(self.name),
            email: trimmed(self.email),
            password: non_blank(self.password),
        }
    }

    pub fn into_command(self) -> Result<UpdateUser, ApiError> {
        let request = self.normalized();
        request.validate().map_err(ApiError::from_validation)?;

        Ok(UpdateUser {
            name: request.name.unwrap_or_default(),
            email: request.email.unwrap_or_default(),
            password: request.password.unwrap_or_default(),
        })
    }
}

/// Body of `PATCH /users/{id}/password`
#[derive(Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdatePasswordRequest {
    #[validate(
        required(message = "The password field is required."),
        length(min = 8, message = "The password field must be at least 8 characters.")
    )]
    #[schema(value_type = String, format = Password, min_length = 8, example = "password123")]
    pub password: Option<String>,
}

impl UpdatePasswordRequest {
    /// Normalise, validate and return the new password
    pub fn into_password(self) -> Result<String, ApiError> {
        let request = Self {
            password: non_blank(self.password),
        };
        request.validate().map_err(ApiError::from_validation)?;
        Ok(request.password.unwrap_or_default())
    }
}

/// Public view of a user; never carries the password hash
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Jane Doe")]
    pub name: String,
    #[schema(example = "jane@example.com")]
    pub email: String,
    pub email_verified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            email_verified_at: user.email_verified_at,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            email_verified_at: user.email_verified_at,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// `{"message": "..."}`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PasswordUpdatedResponse {
    pub message: String,
    pub user: UserResponse,
}
