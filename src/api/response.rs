//! Response types for the parcel rate engine API.
//!
//! This module defines the error response structures and the mapping from
//! [`EngineError`] to HTTP status codes.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::RuleSet;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates the response for a reload with no backing store.
    pub fn no_rule_store() -> Self {
        Self::with_details(
            "NO_RULE_STORE",
            "No rule store is configured",
            "Rules are held in memory only and cannot be reloaded",
        )
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates an error response.
    pub fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::InvalidPackage { .. } => ApiErrorResponse::new(
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INVALID_PACKAGE",
                    message,
                    "Package dimensions and weight must be positive integers",
                ),
            ),
            EngineError::GirthExceeded { limit_mm, .. } => ApiErrorResponse::new(
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "GIRTH_EXCEEDED",
                    message,
                    format!(
                        "Length plus twice the width and twice the height may not exceed {} mm",
                        limit_mm
                    ),
                ),
            ),
            EngineError::NoMatchingRule { .. } => ApiErrorResponse::new(
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "NO_MATCHING_RULE",
                    message,
                    "The package is larger or heavier than every configured rate",
                ),
            ),
            EngineError::RuleIndexOutOfRange { .. } => ApiErrorResponse::new(
                StatusCode::NOT_FOUND,
                ApiError::new("RULE_NOT_FOUND", message),
            ),
            EngineError::ConfigFormat { .. }
            | EngineError::ConfigIo { .. }
            | EngineError::SettingsError { .. } => ApiErrorResponse::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
        }
    }
}

/// Response body for `GET /rules` and `POST /rules/reload`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSetResponse {
    /// The active rules, in resolution order.
    pub rules: RuleSet,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details")); // Should be skipped when None
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_girth_exceeded_maps_to_bad_request() {
        let api_error: ApiErrorResponse = EngineError::GirthExceeded {
            girth_mm: 3600,
            limit_mm: 3000,
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "GIRTH_EXCEEDED");
        assert!(api_error.error.message.contains("3600"));
    }

    #[test]
    fn test_no_matching_rule_maps_to_bad_request() {
        let api_error: ApiErrorResponse = EngineError::NoMatchingRule {
            package: "1x1x1 mm, 99999 g".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "NO_MATCHING_RULE");
    }

    #[test]
    fn test_rule_index_maps_to_not_found() {
        let api_error: ApiErrorResponse =
            EngineError::RuleIndexOutOfRange { index: 9, len: 2 }.into();
        assert_eq!(api_error.status, StatusCode::NOT_FOUND);
        assert_eq!(api_error.error.code, "RULE_NOT_FOUND");
    }

    #[test]
    fn test_config_errors_map_to_internal_error() {
        let api_error: ApiErrorResponse = EngineError::ConfigIo {
            location: "rules.properties".to_string(),
            message: "permission denied".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "CONFIG_ERROR");
        assert!(api_error.error.details.unwrap().contains("permission denied"));
    }
}
