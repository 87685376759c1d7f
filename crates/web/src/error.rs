use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use storage::error::StorageError;
use validator::ValidationErrors;

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Storage(StorageError),
    Validation(ValidationErrors),
    BadRequest(String),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "Storage error: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
        }
    }
}

impl WebError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Storage(StorageError::NotFound | StorageError::RegionNotFound(_)) => {
                StatusCode::NOT_FOUND
            }
            Self::Storage(StorageError::InvalidQuery(_)) => StatusCode::BAD_REQUEST,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let body = match &self {
            Self::Storage(StorageError::NotFound) => json!({ "error": "Resource not found" }),
            Self::Storage(e @ StorageError::RegionNotFound(_)) => json!({ "error": e.to_string() }),
            Self::Storage(StorageError::InvalidQuery(msg)) | Self::BadRequest(msg) => {
                json!({ "error": msg })
            }
            Self::Storage(e) => {
                tracing::error!(error = ?e, "Request failed on storage");
                json!({ "error": "An internal error occurred" })
            }
            Self::Validation(errors) => json!({
                "error": "Validation failed",
                "details": field_messages(errors),
            }),
        };

        (self.status_code(), Json(body)).into_response()
    }
}

/// `field: message` for every failed rule, falling back to the rule code.
fn field_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, failures)| {
            failures.iter().map(move |failure| {
                let message = failure
                    .message
                    .as_deref()
                    .map(str::to_string)
                    .unwrap_or_else(|| failure.code.to_string());
                format!("{}: {}", field, message)
            })
        })
        .collect();
    messages.sort();
    messages
}

impl From<StorageError> for WebError {
    fn from(error: StorageError) -> Self {
        Self::Storage(error)
    }
}

impl From<ValidationErrors> for WebError {
    fn from(error: ValidationErrors) -> Self {
        Self::Validation(error)
    }
}

pub type ApiResult<T> = Result<T, WebError>;
