//! Response types for the paystub API.
//!
//! This module defines the success bodies, the error response structures
//! and the mapping from [`EngineError`] to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{Country, DispatchResult};

/// Body of a successful `/process` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessResponse {
    /// Issuing company.
    pub company: String,
    /// Country the batch was issued for (`DO` or `US`).
    pub country: Country,
    /// When the batch finished.
    pub processed_at: DateTime<Utc>,
    /// One entry per dispatched paystub, in input order.
    pub sent: Vec<DispatchResult>,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `ok`.
    pub status: String,
    /// Crate version.
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Body returned for an unrecognized country code:
/// `{"error": "Invalid country option."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryError {
    /// Always `Invalid country option.`
    pub error: String,
}

impl CountryError {
    /// The message sent for every unrecognized country.
    pub const MESSAGE: &'static str = "Invalid country option.";
}

impl Default for CountryError {
    fn default() -> Self {
        Self {
            error: Self::MESSAGE.to_string(),
        }
    }
}

impl IntoResponse for CountryError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, Json(self)).into_response()
    }
}

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

    /// Creates a missing field error response.
    pub fn missing_field(field: impl Into<String>) -> Self {
        let field = field.into();
        Self::with_details(
            "VALIDATION_ERROR",
            format!("missing field: {}", field),
            format!("Required form field '{}' was not provided", field),
        )
    }

    /// Creates a malformed multipart body error response.
    pub fn malformed_multipart(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_MULTIPART", message)
    }

    /// Creates a forbidden error response.
    pub fn forbidden() -> Self {
        Self::new("FORBIDDEN", "Invalid credentials")
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
    /// Pairs `error` with `status`.
    pub fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        let (status, code) = match &error {
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR")
            }
            EngineError::MissingColumns { .. } => (StatusCode::BAD_REQUEST, "MISSING_COLUMNS"),
            EngineError::InvalidRecord { .. } => (StatusCode::BAD_REQUEST, "INVALID_RECORD"),
            EngineError::MalformedInput { .. } => (StatusCode::BAD_REQUEST, "MALFORMED_INPUT"),
            EngineError::UnknownCountry { .. } => (StatusCode::BAD_REQUEST, "INVALID_COUNTRY"),
            EngineError::AssetUnavailable { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "ASSET_UNAVAILABLE")
            }
            EngineError::AssetDecode { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "ASSET_DECODE"),
            EngineError::RenderFailed { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "RENDER_FAILED"),
            EngineError::DispatchFailed { .. } => (StatusCode::BAD_GATEWAY, "DISPATCH_FAILED"),
        };

        let error = match error {
            EngineError::MissingColumns { columns } => {
                ApiError::with_details(code, message, columns.join(","))
            }
            EngineError::InvalidRecord { row, field, .. } => {
                ApiError::with_details(code, message, format!("row {}, column {}", row, field))
            }
            _ => ApiError::new(code, message),
        };
        Self::new(status, error)
    }
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
    fn test_country_error_body() {
        let json = serde_json::to_string(&CountryError::default()).unwrap();
        assert_eq!(json, r#"{"error":"Invalid country option."}"#);
    }

    #[test]
    fn test_parse_errors_are_bad_request() {
        let cases = [
            (
                EngineError::MissingColumns {
                    columns: vec!["email".to_string(), "period".to_string()],
                },
                "MISSING_COLUMNS",
            ),
            (
                EngineError::InvalidRecord {
                    row: 2,
                    field: "gross_salary".to_string(),
                    message: "bad".to_string(),
                },
                "INVALID_RECORD",
            ),
            (
                EngineError::MalformedInput {
                    message: "ragged".to_string(),
                },
                "MALFORMED_INPUT",
            ),
        ];
        for (engine_error, code) in cases {
            let api_error: ApiErrorResponse = engine_error.into();
            assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
            assert_eq!(api_error.error.code, code);
        }
    }

    #[test]
    fn test_missing_columns_details() {
        let api_error: ApiErrorResponse = EngineError::MissingColumns {
            columns: vec!["email".to_string(), "period".to_string()],
        }
        .into();
        assert_eq!(api_error.error.details.as_deref(), Some("email,period"));
    }

    #[test]
    fn test_dispatch_failure_is_bad_gateway() {
        let api_error: ApiErrorResponse = EngineError::DispatchFailed {
            recipient: "john@x.com".to_string(),
            message: "refused".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_GATEWAY);
        assert_eq!(api_error.error.code, "DISPATCH_FAILED");
        assert!(api_error.error.message.contains("john@x.com"));
    }

    #[test]
    fn test_asset_failures_are_server_errors() {
        let api_error: ApiErrorResponse = EngineError::AssetDecode {
            message: "bad png".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "ASSET_DECODE");
    }

    #[test]
    fn test_process_response_serializes_country_name() {
        let response = ProcessResponse {
            company: "Acme".to_string(),
            country: Country::UnitedStates,
            processed_at: DateTime::parse_from_rfc3339("2024-02-01T10:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
            sent: vec![],
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["country"], "US");
        assert_eq!(json["company"], "Acme");
        assert_eq!(json["processed_at"], "2024-02-01T10:00:00Z");
    }
}
