//! Error types and API response bodies

use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application error with structured error code and optional cause
///
/// - `code` picks the HTTP status and log category
/// - `message` is what the client sees
/// - `cause` carries the underlying failure text for diagnostics
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Underlying cause (driver error, CSV error, ...)
    pub cause: Option<String>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            cause: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            cause: None,
        }
    }

    /// Attach the underlying cause
    pub fn with_cause(mut self, cause: impl ToString) -> Self {
        self.cause = Some(cause.to_string());
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    /// Whether this error is the server's fault (5xx); those are logged
    /// as errors together with their cause
    pub fn is_server_error(&self) -> bool {
        self.http_status().is_server_error()
    }

    // ==================== Convenience constructors ====================

    /// Create a database error carrying the driver's message
    pub fn database(cause: impl ToString) -> Self {
        Self::new(ErrorCode::DatabaseError).with_cause(cause)
    }

    /// Body used by the query endpoints: `{"error": message}`
    pub fn to_error_body(&self) -> ErrorBody {
        ErrorBody {
            error: self.message.clone(),
        }
    }

    /// Body used by the upload endpoint: `{"message": message, "error": cause}`
    pub fn to_message_body(&self) -> MessageBody {
        MessageBody {
            message: self.message.clone(),
            error: self.cause.clone(),
            count: None,
        }
    }
}

/// `{"error": "..."}` response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// `{"message": "...", "error": "..."}` response body
///
/// `error` is only present on failures that carry a cause, `count` only on
/// successful uploads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}

impl MessageBody {
    /// Success body with the number of stores written
    pub fn success(message: impl Into<String>, count: u64) -> Self {
        Self {
            message: message.into(),
            error: None,
            count: Some(count),
        }
    }
}

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();

        if self.is_server_error() {
            tracing::error!(
                code = %self.code,
                category = self.code.category().name(),
                message = %self.message,
                cause = self.cause.as_deref().unwrap_or(""),
                "Server error occurred"
            );
        }

        (status, Json(self.to_error_body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::StoreNotFound);
        assert_eq!(err.code, ErrorCode::StoreNotFound);
        assert_eq!(err.message, "Store not found");
        assert!(err.cause.is_none());
    }

    #[test]
    fn test_app_error_with_cause() {
        let err = AppError::with_message(ErrorCode::DatabaseError, "Database error.")
            .with_cause("connection refused");
        assert_eq!(err.message, "Database error.");
        assert_eq!(err.cause.as_deref(), Some("connection refused"));
        assert_eq!(err.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_server_error_follows_status_not_category() {
        for code in [
            ErrorCode::CsvReadFailed,
            ErrorCode::StagingFailed,
            ErrorCode::UploadStreamFailed,
            ErrorCode::DatabaseError,
        ] {
            assert!(AppError::new(code).is_server_error(), "{code}");
        }
        assert_eq!(
            ErrorCode::CsvReadFailed.category(),
            crate::error::ErrorCategory::Ingest
        );

        for code in [
            ErrorCode::FileMissing,
            ErrorCode::NoValidRows,
            ErrorCode::UploadTooLarge,
            ErrorCode::StoreNotFound,
        ] {
            assert!(!AppError::new(code).is_server_error(), "{code}");
        }
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::new(ErrorCode::RangeRequired);
        assert_eq!(
            format!("{}", err),
            "Latitude and longitude range is required"
        );
    }

    #[test]
    fn test_error_body_serialize() {
        let body = AppError::new(ErrorCode::StoreNotFound).to_error_body();
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "Store not found" }));
    }

    #[test]
    fn test_message_body_omits_absent_fields() {
        let body = AppError::new(ErrorCode::FileMissing).to_message_body();
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "message": "No file uploaded." }));

        let body = AppError::database("boom").to_message_body();
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "message": "Database query failed.", "error": "boom" })
        );
    }

    #[test]
    fn test_message_body_success() {
        let body = MessageBody::success("done", 3);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "message": "done", "count": 3 }));
    }
}
