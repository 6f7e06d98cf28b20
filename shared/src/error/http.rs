//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // 404 Not Found
            Self::NotFound | Self::StoreNotFound => StatusCode::NOT_FOUND,

            // 413 Payload Too Large
            Self::UploadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,

            // 500 Internal Server Error
            Self::UploadStreamFailed
            | Self::CsvReadFailed
            | Self::StagingFailed
            | Self::InternalError
            | Self::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (default for client input errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_status() {
        assert_eq!(ErrorCode::NotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::StoreNotFound.http_status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_client_input_status() {
        assert_eq!(ErrorCode::FileMissing.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::NoValidRows.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ErrorCode::RangeRequired.http_status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_upload_stream_statuses() {
        assert_eq!(
            ErrorCode::UploadStreamFailed.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ErrorCode::UploadTooLarge.http_status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }

    #[test]
    fn test_server_error_status() {
        assert_eq!(
            ErrorCode::CsvReadFailed.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ErrorCode::DatabaseError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ErrorCode::StagingFailed.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
