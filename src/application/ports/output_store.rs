use async_trait::async_trait;
#[cfg(test)]
use mockall::{automock, predicate::*};
use std::path::{Path, PathBuf};
use std::pin::Pin;
use thiserror::Error;
use tokio::io::AsyncRead;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid file name: {0}")]
    InvalidName(String),
}

/// Type alias for async reader
pub type FileReader = Pin<Box<dyn AsyncRead + Send>>;

/// Where an upload landed on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUpload {
    pub stored_name: String,
    pub path: PathBuf,
}

/// Port for upload and output file storage
#[cfg_attr(test, automock)]
#[async_trait]
pub trait OutputStore: Send + Sync {
    /// Persists an upload as `<field>-<millis>-<random><ext>`.
    async fn save_upload(
        &self,
        field: &str,
        original_name: &str,
        data: &[u8],
    ) -> Result<StoredUpload, StorageError>;

    /// Atomically replaces the output called `file_name`.
    async fn write_output(&self, file_name: &str, data: &[u8]) -> Result<(), StorageError>;

    /// Opens an output for streaming; returns the reader and the byte size.
    async fn open_output(&self, file_name: &str) -> Result<(FileReader, u64), StorageError>;

    /// Deletes an upload. A file that is already gone is not an error.
    async fn remove_upload(&self, path: &Path) -> Result<(), StorageError>;
}
