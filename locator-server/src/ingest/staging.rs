//! Upload staging area
//!
//! Uploaded files are streamed to disk under a unique name before parsing.
//! Staged files are never cleaned up.

use std::path::{Path, PathBuf};

use futures::{Stream, StreamExt};
use shared::util::now_millis;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use super::IngestError;

const DEFAULT_FILE_NAME: &str = "upload.csv";

#[derive(Debug, Clone)]
pub struct StagingArea {
    dir: PathBuf,
}

impl StagingArea {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the staging directory if it does not exist
    pub async fn ensure(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    /// `{millis}-{short id}-{sanitized original name}` inside the staging dir
    pub fn staged_path(&self, original_name: Option<&str>) -> PathBuf {
        let id = Uuid::new_v4().simple().to_string();
        let file_name = format!(
            "{}-{}-{}",
            now_millis(),
            &id[..8],
            sanitize_file_name(original_name)
        );
        self.dir.join(file_name)
    }

    /// Stream an upload body to a fresh file and return its path
    pub async fn persist<S, B>(
        &self,
        original_name: Option<&str>,
        chunks: S,
    ) -> Result<PathBuf, IngestError>
    where
        S: Stream<Item = Result<B, IngestError>>,
        B: AsRef<[u8]>,
    {
        self.ensure().await.map_err(IngestError::Staging)?;

        let path = self.staged_path(original_name);
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(IngestError::Staging)?;

        let mut chunks = std::pin::pin!(chunks);
        while let Some(chunk) = chunks.next().await {
            let chunk = chunk?;
            file.write_all(chunk.as_ref())
                .await
                .map_err(IngestError::Staging)?;
        }
        file.flush().await.map_err(IngestError::Staging)?;

        Ok(path)
    }
}

/// Last path component of the client-supplied name, restricted to a safe
/// character set
fn sanitize_file_name(original_name: Option<&str>) -> String {
    let base = original_name
        .and_then(|n| n.rsplit(['/', '\\']).next())
        .unwrap_or_default();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.trim_matches('.').is_empty() {
        DEFAULT_FILE_NAME.to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name(Some("stores.csv")), "stores.csv");
        assert_eq!(sanitize_file_name(Some("../../etc/passwd")), "passwd");
        assert_eq!(sanitize_file_name(Some("C:\\tmp\\my stores.csv")), "my_stores.csv");
        assert_eq!(sanitize_file_name(Some("..")), DEFAULT_FILE_NAME);
        assert_eq!(sanitize_file_name(Some("dir/")), DEFAULT_FILE_NAME);
        assert_eq!(sanitize_file_name(None), DEFAULT_FILE_NAME);
    }

    #[test]
    fn test_staged_paths_are_unique() {
        let staging = StagingArea::new("/tmp/staging");
        let a = staging.staged_path(Some("stores.csv"));
        let b = staging.staged_path(Some("stores.csv"));
        assert_ne!(a, b);
        assert!(a.starts_with("/tmp/staging"));
        assert!(a.to_string_lossy().ends_with("-stores.csv"));
    }

    #[tokio::test]
    async fn test_persist_writes_all_chunks() {
        let dir = tempfile::tempdir().unwrap();
        let staging = StagingArea::new(dir.path().join("nested"));

        let body = stream::iter(vec![
            Ok::<_, IngestError>(b"name,latitude\n".to_vec()),
            Ok(b"S1,12.5\n".to_vec()),
        ]);
        let path = staging.persist(Some("stores.csv"), body).await.unwrap();

        assert!(path.starts_with(staging.dir()));
        let written = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(written, "name,latitude\nS1,12.5\n");
    }

    #[tokio::test]
    async fn test_persist_body_error() {
        let dir = tempfile::tempdir().unwrap();
        let staging = StagingArea::new(dir.path());

        let body = stream::iter(vec![
            Ok(b"name\n".to_vec()),
            Err(IngestError::Stream("connection closed".into())),
        ]);
        let err = staging.persist(None, body).await.unwrap_err();
        assert!(matches!(err, IngestError::Stream(_)));
    }
}
