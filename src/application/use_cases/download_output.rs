use std::sync::Arc;
use thiserror::Error;

use crate::application::dto::DownloadMetadata;
use crate::application::ports::{FileReader, OutputStore, StorageError};
use crate::domain::value_objects::OutputFormat;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("Invalid file name: {0}")]
    InvalidName(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Rejects anything that could escape the output directory.
pub fn is_safe_file_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.contains("..")
        && !name.contains(['/', '\\', '\0'])
}

/// MIME type looked up from the file extension.
pub fn content_type_for(name: &str) -> &'static str {
    name.rsplit_once('.')
        .and_then(|(_, ext)| OutputFormat::from_extension(ext))
        .map(|format| format.mime_type())
        .unwrap_or("application/octet-stream")
}

/// Use case: Stream a processed output
pub struct DownloadOutputUseCase {
    store: Arc<dyn OutputStore>,
}

impl DownloadOutputUseCase {
    pub fn new(store: Arc<dyn OutputStore>) -> Self {
        Self { store }
    }

    pub async fn execute(
        &self,
        file_name: &str,
    ) -> Result<(DownloadMetadata, FileReader), DownloadError> {
        if !is_safe_file_name(file_name) {
            return Err(DownloadError::InvalidName(file_name.to_string()));
        }

        let (reader, size_bytes) = match self.store.open_output(file_name).await {
            Ok(opened) => opened,
            Err(StorageError::NotFound(_)) => {
                return Err(DownloadError::NotFound(file_name.to_string()))
            }
            Err(StorageError::InvalidName(name)) => return Err(DownloadError::InvalidName(name)),
            Err(e) => return Err(DownloadError::Storage(e)),
        };

        let metadata = DownloadMetadata {
            file_name: file_name.to_string(),
            size_bytes,
            content_type: content_type_for(file_name).to_string(),
        };

        Ok((metadata, reader))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockOutputStore;
    use std::io::Cursor;

    #[test]
    fn test_file_name_guard() {
        assert!(is_safe_file_name("processed-pdf-merger.pdf"));
        assert!(!is_safe_file_name("../secret"));
        assert!(!is_safe_file_name("a/b.pdf"));
        assert!(!is_safe_file_name("a\\b.pdf"));
        assert!(!is_safe_file_name(".hidden"));
        assert!(!is_safe_file_name(""));
    }

    #[test]
    fn test_content_types_follow_extension() {
        assert_eq!(content_type_for("processed-x.pdf"), "application/pdf");
        assert_eq!(content_type_for("processed-x.png"), "image/png");
        assert_eq!(content_type_for("processed-x.mp3"), "audio/mpeg");
        assert_eq!(content_type_for("processed-x.weird"), "application/octet-stream");
        assert_eq!(content_type_for("noext"), "application/octet-stream");
    }

    #[tokio::test]
    async fn test_download_existing_output() {
        let mut store = MockOutputStore::new();
        store
            .expect_open_output()
            .withf(|name| name == "processed-qr-generator.svg")
            .returning(|_| Ok((Box::pin(Cursor::new(b"<svg/>".to_vec())), 6)));

        let (metadata, _reader) = DownloadOutputUseCase::new(Arc::new(store))
            .execute("processed-qr-generator.svg")
            .await
            .unwrap();
        assert_eq!(metadata.size_bytes, 6);
        assert_eq!(metadata.content_type, "image/svg+xml");
    }

    #[tokio::test]
    async fn test_missing_output_is_not_found() {
        let mut store = MockOutputStore::new();
        store
            .expect_open_output()
            .returning(|name| Err(StorageError::NotFound(name.to_string())));

        let result = DownloadOutputUseCase::new(Arc::new(store))
            .execute("processed-none.pdf")
            .await;
        assert!(matches!(result, Err(DownloadError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_traversal_never_reaches_store() {
        let result = DownloadOutputUseCase::new(Arc::new(MockOutputStore::new()))
            .execute("../../etc/passwd")
            .await;
        assert!(matches!(result, Err(DownloadError::InvalidName(_))));
    }
}
