use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application error type
#[derive(Debug, Error)]
pub enum AppError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Validation error: {0}")]
    ValidationError(String),

    // Request errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Not found: {0}")]
    NotFound(String),

    // Internal errors
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AppError {
    fn status_and_type(&self) -> (StatusCode, &'static str) {
        match self {
            Self::ConfigError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error"),
            Self::ValidationError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "validation_error"),
            Self::InvalidInput(_) => (StatusCode::BAD_REQUEST, "invalid_input"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            Self::InternalError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::ConfigError(msg)
            | Self::ValidationError(msg)
            | Self::InvalidInput(msg)
            | Self::BadRequest(msg)
            | Self::NotFound(msg)
            | Self::InternalError(msg) => msg,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type) = self.status_and_type();

        let body = Json(json!({
            "error": {
                "message": self.message(),
                "type": error_type,
                "status": status.as_u16(),
            }
        }));

        (status, body).into_response()
    }
}

// Conversion implementations for common error types
impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::ConfigError(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

/// Result type alias for application errors
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = AppError::InvalidInput("prompt_a exceeds 10 characters".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid input: prompt_a exceeds 10 characters"
        );
    }

    #[test]
    fn test_error_status_mapping() {
        let response = AppError::InvalidInput("too long".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = AppError::NotFound("missing".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = AppError::InternalError("boom".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_from_config_error() {
        let error: AppError = config::ConfigError::NotFound("server.port".to_string()).into();
        assert!(matches!(error, AppError::ConfigError(_)));
        assert_eq!(
            error.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
