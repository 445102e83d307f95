// src/api/error.rs
// Centralized error handling for HTTP API responses

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;
use tracing::{error, warn};

use crate::error::PortalError;

/// Standard API error response format
#[derive(Debug)]
pub struct ApiError {
    pub message: String,
    pub status_code: StatusCode,
    pub error_code: Option<String>,
}

impl ApiError {
    /// Create a new internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: StatusCode::INTERNAL_SERVER_ERROR,
            error_code: Some("INTERNAL_ERROR".to_string()),
        }
    }

    /// Create a new bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: StatusCode::BAD_REQUEST,
            error_code: Some("BAD_REQUEST".to_string()),
        }
    }

    /// Create a new not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: StatusCode::NOT_FOUND,
            error_code: Some("NOT_FOUND".to_string()),
        }
    }

    /// Create a new unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: StatusCode::UNAUTHORIZED,
            error_code: Some("UNAUTHORIZED".to_string()),
        }
    }

    /// Create a new forbidden error
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: StatusCode::FORBIDDEN,
            error_code: Some("FORBIDDEN".to_string()),
        }
    }

    /// Create a new conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: StatusCode::CONFLICT,
            error_code: Some("CONFLICT".to_string()),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response_json = json!({
            "error": true,
            "message": self.message,
            "status": self.status_code.as_u16()
        });

        if let Some(error_code) = self.error_code {
            response_json["error_code"] = json!(error_code);
        }

        (self.status_code, Json(response_json)).into_response()
    }
}

impl From<PortalError> for ApiError {
    fn from(err: PortalError) -> Self {
        match err {
            PortalError::Validation(msg) => ApiError::bad_request(msg),
            PortalError::NotFound(msg) => ApiError::not_found(msg),
            PortalError::Conflict(msg) => ApiError::conflict(msg),
            PortalError::Unauthorized(msg) => ApiError::unauthorized(msg),
            PortalError::Forbidden(msg) => ApiError::forbidden(msg),
            PortalError::Database(e) => db_error("request", e),
            PortalError::Internal(msg) => {
                error!("Internal error: {}", msg);
                ApiError::internal("Server error")
            }
        }
    }
}

// Malformed or missing JSON bodies answer in the same envelope as every other error
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!("Rejected request body: {}", rejection.body_text());
        ApiError {
            message: rejection.body_text(),
            status_code: rejection.status(),
            error_code: Some("INVALID_BODY".to_string()),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        warn!("Rejected query string: {}", rejection.body_text());
        ApiError {
            message: rejection.body_text(),
            status_code: rejection.status(),
            error_code: Some("INVALID_QUERY".to_string()),
        }
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Extension trait for Option<T> to create ApiError for None cases
pub trait IntoApiErrorOption<T> {
    fn ok_or_not_found(self, message: &str) -> Result<T, ApiError>;
}

impl<T> IntoApiErrorOption<T> for Option<T> {
    fn ok_or_not_found(self, message: &str) -> Result<T, ApiError> {
        self.ok_or_else(|| ApiError::not_found(message))
    }
}

/// Helper function for database operation errors
pub fn db_error(operation: &str, error: impl std::fmt::Debug) -> ApiError {
    let message = format!("Database error during {operation}");
    error!("{}: {:?}", message, error);
    ApiError::internal(message)
}

/// Helper function for missing parameter errors
pub fn missing_param_error(param_name: &str) -> ApiError {
    ApiError::bad_request(format!("Missing required parameter: {param_name}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_api_error_creation() {
        let error = ApiError::internal("Test error");
        assert_eq!(error.status_code, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.message, "Test error");
    }

    #[test]
    fn test_option_extensions() {
        let none_value: Option<i32> = None;
        let result = none_value.ok_or_not_found("Actualité not found");

        let error = result.unwrap_err();
        assert_eq!(error.status_code, StatusCode::NOT_FOUND);
        assert_eq!(error.message, "Actualité not found");
    }

    #[test]
    fn test_portal_error_mapping() {
        let cases = [
            (PortalError::validation("Title is required"), StatusCode::BAD_REQUEST),
            (PortalError::not_found("Post not found"), StatusCode::NOT_FOUND),
            (PortalError::conflict("User already exists"), StatusCode::CONFLICT),
            (PortalError::unauthorized("Invalid credentials"), StatusCode::UNAUTHORIZED),
            (PortalError::forbidden("Admin access required"), StatusCode::FORBIDDEN),
        ];

        for (err, status) in cases {
            let expected = err.to_string();
            let api: ApiError = err.into();
            assert_eq!(api.status_code, status);
            assert_eq!(api.message, expected);
        }
    }

    #[test]
    fn test_internal_details_not_leaked() {
        let api: ApiError = PortalError::internal("bcrypt exploded at cost 99").into();
        assert_eq!(api.status_code, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!api.message.contains("bcrypt"));
    }

    #[test]
    fn test_missing_param_message() {
        let error = missing_param_error("userId");
        assert_eq!(error.status_code, StatusCode::BAD_REQUEST);
        assert!(error.message.contains("userId"));
    }
}
