use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use storage::dto::registration::error_messages;
use storage::error::StorageError;
use validator::ValidationErrors;

pub const COMPETITION_NOT_FOUND: &str = "Competition not found";

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Storage(StorageError),
    Validation(ValidationErrors),
    BadRequest(String),
    InvalidState(String),
    NotFound(&'static str),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "Storage error: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
            Self::NotFound(msg) => write!(f, "Not found: {}", msg),
        }
    }
}

impl WebError {
    /// Lift a storage failure into the web taxonomy, giving `NotFound` the
    /// resource-specific wire message.
    pub fn from_storage(error: StorageError, not_found_message: &'static str) -> Self {
        match error {
            StorageError::NotFound => Self::NotFound(not_found_message),
            other => Self::Storage(other),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            Self::Storage(StorageError::NotFound) => StatusCode::NOT_FOUND,
            Self::Storage(StorageError::ConstraintViolation(_)) => StatusCode::CONFLICT,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::InvalidState(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        };

        let body = match &self {
            Self::Storage(StorageError::NotFound) => {
                json!({
                    "success": false,
                    "message": "Resource not found"
                })
            }
            Self::Storage(StorageError::ConstraintViolation(msg)) => {
                tracing::warn!("Constraint violation: {}", msg);
                json!({
                    "success": false,
                    "message": msg
                })
            }
            Self::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                json!({
                    "success": false,
                    "message": "An unexpected error occurred",
                    "error": "Internal server error"
                })
            }
            Self::Validation(errors) => {
                json!({
                    "success": false,
                    "message": "Validation failed",
                    "errors": error_messages(errors)
                })
            }
            Self::BadRequest(msg) => {
                json!({
                    "success": false,
                    "message": msg
                })
            }
            Self::InvalidState(msg) => {
                json!({
                    "success": false,
                    "message": msg
                })
            }
            Self::NotFound(msg) => {
                json!({
                    "success": false,
                    "message": msg
                })
            }
        };

        (status_code, Json(body)).into_response()
    }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            WebError::NotFound("Competition not found")
                .into_response()
                .status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            WebError::Storage(StorageError::ConstraintViolation("duplicate".into()))
                .into_response()
                .status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            WebError::InvalidState("closed".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            WebError::BadRequest("bad".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
    }
}
