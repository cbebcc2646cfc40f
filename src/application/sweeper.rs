use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::time;
use tracing::{error, info};

use crate::application::ports::{OutputStore, RepositoryError, UserFileRepository};

/// Outcome of one sweep.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SweepResult {
    pub files_deleted: usize,
    pub errors: Vec<String>,
}

impl SweepResult {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Periodically deletes uploads whose retention window has passed.
///
/// Processed outputs are left alone; each tool overwrites its own output.
pub struct UploadSweeper {
    file_repo: Arc<dyn UserFileRepository>,
    store: Arc<dyn OutputStore>,
    interval: Duration,
}

impl UploadSweeper {
    pub fn new(
        file_repo: Arc<dyn UserFileRepository>,
        store: Arc<dyn OutputStore>,
        interval: Duration,
    ) -> Self {
        Self {
            file_repo,
            store,
            interval,
        }
    }

    /// Run the sweep loop forever
    pub async fn run(self: Arc<Self>) {
        info!("Starting upload sweeper with interval: {:?}", self.interval);

        let mut interval = time::interval(self.interval);

        loop {
            interval.tick().await;

            match self.sweep_once(Utc::now()).await {
                Ok(result) => {
                    if result.files_deleted > 0 {
                        info!(files_deleted = result.files_deleted, "Upload sweep completed");
                    }
                    for e in &result.errors {
                        error!("Upload sweep error: {}", e);
                    }
                }
                Err(e) => error!("Upload sweep cycle failed: {}", e),
            }
        }
    }

    /// Deletes every upload that expired at or before `now`.
    ///
    /// A record is dropped only after its file is gone. A file that fails to
    /// delete is reported in `errors` and its record stays for the next sweep.
    pub async fn sweep_once(&self, now: DateTime<Utc>) -> Result<SweepResult, RepositoryError> {
        let expired = self.file_repo.list_expired(now).await?;
        let mut result = SweepResult::default();

        for file in expired {
            if let Err(e) = self.store.remove_upload(&file.path).await {
                result
                    .errors
                    .push(format!("{}: {}", file.path.display(), e));
                continue;
            }

            match self.file_repo.delete(file.id).await {
                Ok(_) => result.files_deleted += 1,
                Err(e) => result
                    .errors
                    .push(format!("record {}: {}", file.id, e)),
            }
        }

        Ok(result)
    }
}
