use bytes::Bytes;
use chrono::{Duration, Utc};
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

use crate::application::dto::ProcessResponse;
use crate::application::ports::{
    OutputStore, RepositoryError, StorageError, ToolUsageRepository, UserFileRepository,
};
use crate::assembly::{self, AssemblyContext, AssemblyError, ToolOptions, UploadedFileInfo};
use crate::catalog::{self, ToolDescriptor};
use crate::domain::entities::{NewToolUsage, NewUserFile};
use crate::domain::value_objects::UserId;

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Tool not found: {0}")]
    UnknownTool(String),

    #[error("File '{name}' is {size} bytes, above the {limit} byte limit")]
    FileTooLarge { name: String, size: u64, limit: u64 },

    #[error("Assembly failed: {0}")]
    Assembly(#[from] AssemblyError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// One multipart file part.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub field: String,
    pub original_name: String,
    pub mime_type: String,
    pub data: Bytes,
}

#[derive(Debug, Clone, Default)]
pub struct ProcessRequest {
    pub user_id: Option<UserId>,
    pub files: Vec<IncomingFile>,
    pub options: ToolOptions,
}

/// Use case: run one catalog tool and publish its output
pub struct ProcessToolUseCase {
    store: Arc<dyn OutputStore>,
    usage_repo: Arc<dyn ToolUsageRepository>,
    file_repo: Arc<dyn UserFileRepository>,
    max_file_size: u64,
    upload_ttl: Duration,
}

impl ProcessToolUseCase {
    pub fn new(
        store: Arc<dyn OutputStore>,
        usage_repo: Arc<dyn ToolUsageRepository>,
        file_repo: Arc<dyn UserFileRepository>,
        max_file_size: u64,
        upload_ttl: Duration,
    ) -> Self {
        Self {
            store,
            usage_repo,
            file_repo,
            max_file_size,
            upload_ttl,
        }
    }

    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    pub async fn execute(
        &self,
        tool_id: &str,
        request: ProcessRequest,
    ) -> Result<ProcessResponse, ProcessError> {
        let started = Instant::now();

        // 1. Resolve tool; unknown ids are rejected rather than defaulted
        let tool = catalog::resolve(tool_id)
            .ok_or_else(|| ProcessError::UnknownTool(tool_id.to_string()))?;

        // 2. Enforce the per-file limit before anything touches disk
        for file in &request.files {
            let size = file.data.len() as u64;
            if size > self.max_file_size {
                return Err(ProcessError::FileTooLarge {
                    name: file.original_name.clone(),
                    size,
                    limit: self.max_file_size,
                });
            }
        }

        // 3. Persist uploads with an expiry for the sweeper
        let expires_at = Utc::now() + self.upload_ttl;
        for file in &request.files {
            let stored = self
                .store
                .save_upload(&file.field, &file.original_name, &file.data)
                .await?;
            self.file_repo
                .create(NewUserFile {
                    user_id: request.user_id,
                    original_name: file.original_name.clone(),
                    stored_name: stored.stored_name,
                    mime_type: file.mime_type.clone(),
                    size: file.data.len() as u64,
                    path: stored.path,
                    expires_at,
                })
                .await?;
        }

        let uploads: Vec<UploadedFileInfo> = request
            .files
            .iter()
            .map(|f| UploadedFileInfo::new(&f.original_name, &f.mime_type, f.data.clone()))
            .collect();

        // 4. Assemble
        let ctx = AssemblyContext::now();
        let output = match assembly::assemble(tool, &uploads, &request.options, &ctx) {
            Ok(output) => output,
            Err(e) => {
                tracing::warn!(tool_id = tool.id, error = %e, "Tool assembly failed");
                self.record_usage(
                    tool,
                    &request,
                    started,
                    false,
                    json!({ "error": e.to_string() }),
                )
                .await;
                return Err(e.into());
            }
        };

        // 5. Publish under the tool's fixed output name
        let file_name = tool.output_file_name();
        self.store.write_output(&file_name, &output.bytes).await?;

        tracing::info!(
            tool_id = tool.id,
            file_name = %file_name,
            output_bytes = output.bytes.len(),
            files = uploads.len(),
            "Tool output written"
        );

        self.record_usage(tool, &request, started, true, output.metadata.clone())
            .await;

        Ok(ProcessResponse {
            success: true,
            message: format!("{} completed successfully", tool.name),
            download_url: format!("/api/download/{}", file_name),
            filename: file_name,
            processing_time: started.elapsed().as_millis() as u64,
            metadata: output.metadata,
        })
    }

    /// Usage history is best effort; a failed write never fails the request.
    ///
    /// Anonymous calls are not recorded: history is only ever read per user.
    async fn record_usage(
        &self,
        tool: &ToolDescriptor,
        request: &ProcessRequest,
        started: Instant,
        success: bool,
        metadata: serde_json::Value,
    ) {
        let Some(user_id) = request.user_id else {
            return;
        };
        let first = request.files.first();
        let usage = NewToolUsage {
            user_id: Some(user_id),
            tool_id: tool.id.to_string(),
            category: tool.category,
            file_name: first.map(|f| f.original_name.clone()),
            file_size: first.map(|f| f.data.len() as u64),
            processing_time_ms: started.elapsed().as_millis() as u64,
            success,
            metadata,
        };
        if let Err(e) = self.usage_repo.record(usage).await {
            tracing::error!(tool_id = tool.id, error = %e, "Failed to record tool usage");
        }
    }
}
