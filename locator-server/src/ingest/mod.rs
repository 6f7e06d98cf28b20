//! Store CSV ingestion
//!
//! Pipeline: stage the upload on disk, decode rows on a blocking thread,
//! collapse repeated names, then upsert everything in one storage call
//! stamped with a single timestamp.

pub mod rows;
pub mod staging;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use chrono::Utc;
use shared::error::{AppError, ErrorCode};
use shared::models::StoreRecord;
use thiserror::Error;

use crate::db::{BoxError, StoreRepository};

pub use rows::{StoreRows, parse_stores};
pub use staging::StagingArea;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("file contained no data rows")]
    NoRows,

    #[error("CSV read error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV read error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV header has no `{0}` column")]
    MissingColumn(&'static str),

    #[error("CSV parser task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("failed to stage upload: {0}")]
    Staging(#[source] std::io::Error),

    #[error("failed to read upload body: {0}")]
    Stream(BoxError),

    #[error("upload body exceeds the size limit: {0}")]
    TooLarge(BoxError),

    #[error("storage error: {0}")]
    Storage(BoxError),
}

impl From<IngestError> for AppError {
    fn from(e: IngestError) -> Self {
        match e {
            IngestError::NoRows => AppError::new(ErrorCode::NoValidRows),
            IngestError::Staging(err) => AppError::new(ErrorCode::StagingFailed).with_cause(err),
            IngestError::Stream(err) => AppError::new(ErrorCode::UploadStreamFailed).with_cause(err),
            IngestError::TooLarge(err) => AppError::new(ErrorCode::UploadTooLarge).with_cause(err),
            IngestError::Task(err) => AppError::new(ErrorCode::InternalError).with_cause(err),
            IngestError::Storage(err) => {
                AppError::with_message(ErrorCode::DatabaseError, "Database error.").with_cause(err)
            }
            other @ (IngestError::Csv(_) | IngestError::Io(_) | IngestError::MissingColumn(_)) => {
                AppError::new(ErrorCode::CsvReadFailed).with_cause(other)
            }
        }
    }
}

impl From<MultipartError> for IngestError {
    fn from(e: MultipartError) -> Self {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            IngestError::TooLarge(e.into())
        } else {
            IngestError::Stream(e.into())
        }
    }
}

/// Outcome of one ingestion run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestReport {
    /// Data rows decoded from the file
    pub rows_read: usize,
    /// Rows inserted or updated in storage
    pub stores_written: u64,
}

/// Keep one record per name: the last occurrence wins, in the position of
/// the first
pub fn collapse_by_name(records: Vec<StoreRecord>) -> Vec<StoreRecord> {
    let mut positions: HashMap<String, usize> = HashMap::with_capacity(records.len());
    let mut collapsed: Vec<StoreRecord> = Vec::with_capacity(records.len());

    for record in records {
        match positions.get(&record.name) {
            Some(&idx) => collapsed[idx] = record,
            None => {
                positions.insert(record.name.clone(), collapsed.len());
                collapsed.push(record);
            }
        }
    }
    collapsed
}

/// Write decoded records; zero records is `NoRows` and touches nothing
pub async fn ingest_records(
    repo: &dyn StoreRepository,
    records: Vec<StoreRecord>,
) -> Result<IngestReport, IngestError> {
    if records.is_empty() {
        return Err(IngestError::NoRows);
    }

    let rows_read = records.len();
    let records = collapse_by_name(records);
    if records.len() < rows_read {
        tracing::debug!(
            rows_read,
            distinct = records.len(),
            "Collapsed repeated store names"
        );
    }

    let stores_written = repo
        .upsert_many(&records, Utc::now())
        .await
        .map_err(IngestError::Storage)?;

    Ok(IngestReport {
        rows_read,
        stores_written,
    })
}

/// Parse a staged file and write its rows
pub async fn ingest_file(
    repo: &dyn StoreRepository,
    path: &Path,
) -> Result<IngestReport, IngestError> {
    let path: PathBuf = path.to_path_buf();
    let records = tokio::task::spawn_blocking(move || {
        let file = std::fs::File::open(&path)?;
        parse_stores(file)
    })
    .await??;

    ingest_records(repo, records).await
}
