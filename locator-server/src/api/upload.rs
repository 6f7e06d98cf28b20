//! Store CSV upload handler
//!
//! Responses use the `{"message": ..., "error": ...}` shape in both the
//! success and failure cases.

use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::response::{IntoResponse, Response};
use futures::TryStreamExt;
use shared::error::{AppError, ErrorCode, MessageBody};

use crate::ingest::{self, IngestError};
use crate::state::AppState;

/// Multipart field carrying the CSV file
const FILE_FIELD: &str = "file";

const UPLOAD_SUCCESS: &str = "File uploaded and data inserted into the database successfully.";

/// Upload failure rendered as a message body
#[derive(Debug)]
pub struct UploadError(AppError);

impl From<AppError> for UploadError {
    fn from(e: AppError) -> Self {
        Self(e)
    }
}

impl From<IngestError> for UploadError {
    fn from(e: IngestError) -> Self {
        Self(e.into())
    }
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        let err = self.0;
        if err.is_server_error() {
            tracing::error!(
                code = %err.code,
                category = err.code.category().name(),
                cause = err.cause.as_deref().unwrap_or(""),
                "Upload failed: {}",
                err.message
            );
        } else {
            tracing::warn!(code = %err.code, "Upload rejected: {}", err.message);
        }
        (err.http_status(), Json(err.to_message_body())).into_response()
    }
}

/// POST /api/v1/upload
pub async fn upload_stores(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<MessageBody>, UploadError> {
    // A request that is not multipart at all carries no file
    let mut multipart = multipart.map_err(|_| AppError::new(ErrorCode::FileMissing))?;

    let mut staged = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(IngestError::from)?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let Some(original_name) = field.file_name().map(str::to_owned) else {
            continue;
        };

        let path = state
            .staging
            .persist(Some(&original_name), field.map_err(IngestError::from))
            .await?;
        tracing::info!(file = %original_name, path = %path.display(), "Upload staged");
        staged = Some(path);
        break;
    }

    let path = staged.ok_or_else(|| AppError::new(ErrorCode::FileMissing))?;
    let report = ingest::ingest_file(state.stores.as_ref(), &path).await?;

    tracing::info!(
        rows_read = report.rows_read,
        stores_written = report.stores_written,
        "Store upload ingested"
    );
    Ok(Json(MessageBody::success(
        UPLOAD_SUCCESS,
        report.stores_written,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn render_logged(err: AppError) -> (StatusCode, String) {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let status = tracing::subscriber::with_default(subscriber, || {
            UploadError(err).into_response().status()
        });
        let output = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();
        (status, output)
    }

    #[test]
    fn test_csv_read_failure_is_logged_as_error_with_cause() {
        let err = AppError::new(ErrorCode::CsvReadFailed)
            .with_cause("CSV header has no `name` column");
        let (status, output) = render_logged(err);

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(output.contains("ERROR"), "{output}");
        assert!(output.contains("CSV header has no `name` column"), "{output}");
    }

    #[test]
    fn test_client_rejection_is_logged_as_warning() {
        let (status, output) = render_logged(AppError::new(ErrorCode::NoValidRows));

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(output.contains("WARN"), "{output}");
        assert!(!output.contains("ERROR"), "{output}");
    }
}
