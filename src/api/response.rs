//! Response types for the payroll engine API.
//!
//! This module defines the success payloads that are not plain models, the
//! error response structures, and the mapping from engine errors to HTTP
//! statuses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::AuditStep;

/// Acknowledgement returned by write endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    /// What happened.
    pub message: String,
    /// Identifier of the affected record, when there is one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl MessageResponse {
    /// Creates a message with an id.
    pub fn with_id(message: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            id: Some(id.into()),
        }
    }
}

/// Response body for `POST /api/payroll/thirty-percent`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThirtyPercentResponse {
    /// The user the suggestion is for.
    pub user_id: String,
    /// Manual-hours pay plus allowances.
    pub base_amount: Decimal,
    /// The suggested deduction.
    pub suggested: Decimal,
    /// How the suggestion was derived.
    pub audit_step: AuditStep,
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

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        // The engine's own message is what the kiosk shows the user.
        let message = error.to_string();
        match error {
            EngineError::SequenceViolation { slot, required } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "SEQUENCE_VIOLATION",
                    message,
                    format!("Slot '{}' requires '{}' to be recorded first", slot, required),
                ),
            },
            EngineError::DuplicatePunch { .. } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::new("DUPLICATE_PUNCH", message),
            },
            EngineError::UserNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("USER_NOT_FOUND", message),
            },
            EngineError::InvalidUser { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_USER",
                    message,
                    "The user data contains invalid information",
                ),
            },
            EngineError::PinConflict { .. } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::new("PIN_CONFLICT", message),
            },
            EngineError::AdminDeletion { .. } => ApiErrorResponse {
                status: StatusCode::FORBIDDEN,
                error: ApiError::new("ADMIN_DELETION", message),
            },
            EngineError::InvalidExtras { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_EXTRAS",
                    message,
                    "The payroll extras contain invalid information",
                ),
            },
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::StoreUnavailable { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("STORE_UNAVAILABLE", "Store unavailable", message),
            },
            EngineError::ExportError { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("EXPORT_ERROR", "Export failed", message),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ClockSlot;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_sequence_violation_mapping() {
        let api_error: ApiErrorResponse = EngineError::SequenceViolation {
            slot: ClockSlot::MorningOut,
            required: "morningIn".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "SEQUENCE_VIOLATION");
        assert_eq!(api_error.error.message, "You must clock in (morningIn) first.");
    }

    #[test]
    fn test_status_per_error() {
        let cases: Vec<(EngineError, StatusCode, &str)> = vec![
            (
                EngineError::DuplicatePunch {
                    slot: ClockSlot::OvertimeIn,
                },
                StatusCode::CONFLICT,
                "DUPLICATE_PUNCH",
            ),
            (
                EngineError::UserNotFound { id: "x".to_string() },
                StatusCode::NOT_FOUND,
                "USER_NOT_FOUND",
            ),
            (
                EngineError::PinConflict {
                    pin: "1111".to_string(),
                },
                StatusCode::CONFLICT,
                "PIN_CONFLICT",
            ),
            (
                EngineError::AdminDeletion {
                    id: "admin-1".to_string(),
                },
                StatusCode::FORBIDDEN,
                "ADMIN_DELETION",
            ),
            (
                EngineError::InvalidExtras {
                    field: "incentives".to_string(),
                    message: "must not be negative".to_string(),
                },
                StatusCode::BAD_REQUEST,
                "INVALID_EXTRAS",
            ),
            (
                EngineError::StoreUnavailable {
                    message: "down".to_string(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
                "STORE_UNAVAILABLE",
            ),
            (
                EngineError::ExportError {
                    message: "io".to_string(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
                "EXPORT_ERROR",
            ),
        ];

        for (error, status, code) in cases {
            let api_error: ApiErrorResponse = error.into();
            assert_eq!(api_error.status, status);
            assert_eq!(api_error.error.code, code);
        }
    }

    #[test]
    fn test_message_response_skips_missing_id() {
        let json = serde_json::to_string(&MessageResponse {
            message: "User deleted".to_string(),
            id: None,
        })
        .unwrap();
        assert_eq!(json, r#"{"message":"User deleted"}"#);
    }
}
