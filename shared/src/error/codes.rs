//! Unified error codes for the store locator
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Ingestion errors (upload, CSV parsing)
//! - 2xxx: Query errors (store lookups)
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Codes are `u16` values so they stay stable in logs and across crates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Resource not found
    NotFound = 3,

    // ==================== 1xxx: Ingestion ====================
    /// Upload request carried no `file` field
    FileMissing = 1001,
    /// Uploaded file produced zero store rows
    NoValidRows = 1002,
    /// Upload body was truncated or corrupt while streaming
    UploadStreamFailed = 1003,
    /// Uploaded CSV stream could not be read
    CsvReadFailed = 1004,
    /// Uploaded file could not be written to the staging area
    StagingFailed = 1005,
    /// Upload body exceeded the configured size limit
    UploadTooLarge = 1006,

    // ==================== 2xxx: Query ====================
    /// Bounding-box query is missing one of its four bounds
    RangeRequired = 2001,
    /// Bounding-box query matched no store
    StoreNotFound = 2002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Default client-facing message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::NotFound => "Resource not found",

            // Ingestion
            ErrorCode::FileMissing => "No file uploaded.",
            ErrorCode::NoValidRows => "No valid data found in the file.",
            ErrorCode::UploadStreamFailed => "Error reading upload stream.",
            ErrorCode::CsvReadFailed => "Error reading CSV file.",
            ErrorCode::StagingFailed => "Failed to stage uploaded file.",
            ErrorCode::UploadTooLarge => "Uploaded file is too large.",

            // Query
            ErrorCode::RangeRequired => "Latitude and longitude range is required",
            ErrorCode::StoreNotFound => "Store not found",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database query failed.",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            3 => Ok(ErrorCode::NotFound),

            1001 => Ok(ErrorCode::FileMissing),
            1002 => Ok(ErrorCode::NoValidRows),
            1003 => Ok(ErrorCode::UploadStreamFailed),
            1004 => Ok(ErrorCode::CsvReadFailed),
            1005 => Ok(ErrorCode::StagingFailed),
            1006 => Ok(ErrorCode::UploadTooLarge),

            2001 => Ok(ErrorCode::RangeRequired),
            2002 => Ok(ErrorCode::StoreNotFound),

            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::NotFound.code(), 3);
        assert_eq!(ErrorCode::FileMissing.code(), 1001);
        assert_eq!(ErrorCode::CsvReadFailed.code(), 1004);
        assert_eq!(ErrorCode::RangeRequired.code(), 2001);
        assert_eq!(ErrorCode::StoreNotFound.code(), 2002);
        assert_eq!(ErrorCode::DatabaseError.code(), 9002);
    }

    #[test]
    fn test_try_from_roundtrip_for_every_code() {
        let all = [
            ErrorCode::NotFound,
            ErrorCode::FileMissing,
            ErrorCode::NoValidRows,
            ErrorCode::UploadStreamFailed,
            ErrorCode::CsvReadFailed,
            ErrorCode::StagingFailed,
            ErrorCode::UploadTooLarge,
            ErrorCode::RangeRequired,
            ErrorCode::StoreNotFound,
            ErrorCode::InternalError,
            ErrorCode::DatabaseError,
        ];
        for code in all {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_invalid_code() {
        assert_eq!(ErrorCode::try_from(4242), Err(InvalidErrorCode(4242)));
        assert_eq!(
            InvalidErrorCode(4242).to_string(),
            "invalid error code: 4242"
        );
    }

    #[test]
    fn test_wire_messages() {
        assert_eq!(ErrorCode::FileMissing.message(), "No file uploaded.");
        assert_eq!(
            ErrorCode::NoValidRows.message(),
            "No valid data found in the file."
        );
        assert_eq!(
            ErrorCode::RangeRequired.message(),
            "Latitude and longitude range is required"
        );
        assert_eq!(ErrorCode::StoreNotFound.message(), "Store not found");
    }

    #[test]
    fn test_serde_as_number() {
        let json = serde_json::to_string(&ErrorCode::StoreNotFound).unwrap();
        assert_eq!(json, "2002");
        let code: ErrorCode = serde_json::from_str("1002").unwrap();
        assert_eq!(code, ErrorCode::NoValidRows);
        assert!(serde_json::from_str::<ErrorCode>("77").is_err());
    }
}
