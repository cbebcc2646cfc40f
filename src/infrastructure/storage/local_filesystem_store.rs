use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use tokio::io::{AsyncWriteExt, BufReader};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::application::ports::{FileReader, OutputStore, StorageError, StoredUpload};
use crate::application::use_cases::is_safe_file_name;
use crate::infrastructure::storage::PathBuilder;

/// Uploads and processed outputs on the local filesystem
pub struct LocalFilesystemStore {
    path_builder: PathBuilder,
    durable_writes: bool,
}

impl LocalFilesystemStore {
    pub fn new(root: PathBuf) -> Self {
        Self::with_durability(root, true)
    }

    pub fn with_durability(root: PathBuf, durable_writes: bool) -> Self {
        Self {
            path_builder: PathBuilder::new(root),
            durable_writes,
        }
    }

    pub fn root(&self) -> &Path {
        self.path_builder.root()
    }

    /// Initialize storage directories
    pub async fn init(&self) -> Result<(), StorageError> {
        fs::create_dir_all(self.path_builder.processed_dir()).await?;
        fs::create_dir_all(self.path_builder.temp_dir()).await?;
        Ok(())
    }

    /// Writes `data` to a fresh temp file and renames it over `target`.
    ///
    /// Readers of `target` see either the previous file or the complete new one.
    async fn write_atomic(&self, target: &Path, data: &[u8]) -> Result<(), StorageError> {
        let temp_path = self.path_builder.temp_path(Uuid::new_v4());

        let written = async {
            let mut file = File::create(&temp_path).await?;
            file.write_all(data).await?;
            if self.durable_writes {
                file.sync_all().await?;
            }
            Ok::<(), std::io::Error>(())
        }
        .await;

        if let Err(e) = written {
            warn!("Failed to write temp file {:?}: {}", temp_path, e);
            let _ = fs::remove_file(&temp_path).await;
            return Err(StorageError::Io(e));
        }

        debug!("Renaming {:?} to {:?}", temp_path, target);
        if let Err(e) = fs::rename(&temp_path, target).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(StorageError::Io(e));
        }

        if self.durable_writes {
            if let Some(parent) = target.parent() {
                match File::open(parent).await {
                    Ok(dir) => {
                        if let Err(e) = dir.sync_all().await {
                            warn!("Failed to sync directory after rename: {}", e);
                        }
                    }
                    Err(e) => warn!("Failed to open directory for sync: {}", e),
                }
            }
        }

        Ok(())
    }
}

#[async_trait]
impl OutputStore for LocalFilesystemStore {
    async fn save_upload(
        &self,
        field: &str,
        original_name: &str,
        data: &[u8],
    ) -> Result<StoredUpload, StorageError> {
        let stored_name = PathBuilder::stored_upload_name(field, original_name);
        let path = self.path_builder.upload_path(&stored_name);
        self.write_atomic(&path, data).await?;
        debug!(stored_name = %stored_name, size = data.len(), "Upload saved");
        Ok(StoredUpload { stored_name, path })
    }

    async fn write_output(&self, file_name: &str, data: &[u8]) -> Result<(), StorageError> {
        if !is_safe_file_name(file_name) {
            return Err(StorageError::InvalidName(file_name.to_string()));
        }
        let path = self.path_builder.output_path(file_name);
        self.write_atomic(&path, data).await
    }

    async fn open_output(&self, file_name: &str) -> Result<(FileReader, u64), StorageError> {
        if !is_safe_file_name(file_name) {
            return Err(StorageError::InvalidName(file_name.to_string()));
        }
        let path = self.path_builder.output_path(file_name);

        let file = File::open(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::NotFound(file_name.to_string())
            } else {
                StorageError::Io(e)
            }
        })?;
        // Size comes from the open handle so it matches the bytes streamed.
        let size = file.metadata().await?.len();

        Ok((Box::pin(BufReader::new(file)), size))
    }

    async fn remove_upload(&self, path: &Path) -> Result<(), StorageError> {
        if !path.starts_with(self.path_builder.root()) {
            return Err(StorageError::InvalidName(path.display().to_string()));
        }
        match fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(e)),
        }
    }
}
