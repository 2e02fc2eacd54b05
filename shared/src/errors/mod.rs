//! JSON error body shared by every endpoint

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Error body: `{"message": "...", "errors": {"field": ["..."]}}`
///
/// `errors` is only present for validation failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    #[schema(example = "User with that ID does not exist")]
    pub message: String,

    /// Per-field validation messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

impl ErrorResponse {
    /// Create an error response with a message only
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors: None,
        }
    }

    /// Create an error response carrying field errors
    pub fn with_errors(
        message: impl Into<String>,
        errors: BTreeMap<String, Vec<String>>,
    ) -> Self {
        Self {
            message: message.into(),
            errors: Some(errors),
        }
    }
}
