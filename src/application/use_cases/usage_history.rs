use std::sync::Arc;
use thiserror::Error;

use crate::application::dto::{FilesResponse, HistoryResponse, UsageDto, UserFileDto};
use crate::application::ports::{RepositoryError, ToolUsageRepository, UserFileRepository};
use crate::domain::value_objects::UserId;

/// Most recent entries returned by the history endpoint.
pub const HISTORY_LIMIT: usize = 50;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Use case: Show a user's tool usage and uploads
pub struct UsageHistoryUseCase {
    usage_repo: Arc<dyn ToolUsageRepository>,
    file_repo: Arc<dyn UserFileRepository>,
}

impl UsageHistoryUseCase {
    pub fn new(
        usage_repo: Arc<dyn ToolUsageRepository>,
        file_repo: Arc<dyn UserFileRepository>,
    ) -> Self {
        Self {
            usage_repo,
            file_repo,
        }
    }

    pub async fn history(&self, user_id: UserId) -> Result<HistoryResponse, HistoryError> {
        let history = self
            .usage_repo
            .list_for_user(user_id, HISTORY_LIMIT)
            .await?
            .into_iter()
            .map(UsageDto::from)
            .collect();
        let stats = self.usage_repo.stats_for_user(user_id).await?;

        Ok(HistoryResponse {
            history,
            stats: stats.into(),
        })
    }

    pub async fn files(&self, user_id: UserId) -> Result<FilesResponse, HistoryError> {
        let files = self
            .file_repo
            .list_for_user(user_id)
            .await?
            .into_iter()
            .map(UserFileDto::from)
            .collect();
        Ok(FilesResponse { files })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{
        MockToolUsageRepository, MockUserFileRepository, UsageStats,
    };
    use crate::domain::entities::{NewToolUsage, ToolUsage};
    use crate::domain::value_objects::ToolCategory;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_history_combines_list_and_stats() {
        let mut usage = MockToolUsageRepository::new();
        usage
            .expect_list_for_user()
            .with(eq(UserId::new(3)), eq(HISTORY_LIMIT))
            .returning(|user_id, _| {
                Ok(vec![ToolUsage::record(
                    9,
                    NewToolUsage {
                        user_id: Some(user_id),
                        tool_id: "pdf-merger".to_string(),
                        category: ToolCategory::Pdf,
                        file_name: Some("a.pdf".to_string()),
                        file_size: Some(10),
                        processing_time_ms: 4,
                        success: true,
                        metadata: serde_json::json!({}),
                    },
                )])
            });
        usage.expect_stats_for_user().returning(|_| {
            Ok(UsageStats {
                files_processed: 1,
                tools_used: 1,
                total_time_ms: 4,
            })
        });

        let response = UsageHistoryUseCase::new(
            Arc::new(usage),
            Arc::new(MockUserFileRepository::new()),
        )
        .history(UserId::new(3))
        .await
        .unwrap();

        assert_eq!(response.history.len(), 1);
        assert_eq!(response.history[0].tool_id, "pdf-merger");
        assert_eq!(response.stats.total_time_ms, 4);
    }

    #[tokio::test]
    async fn test_files_propagates_repository_errors() {
        let mut files = MockUserFileRepository::new();
        files
            .expect_list_for_user()
            .returning(|_| Err(RepositoryError::Internal("boom".to_string())));

        let result = UsageHistoryUseCase::new(Arc::new(MockToolUsageRepository::new()), Arc::new(files))
            .files(UserId::new(1))
            .await;
        assert!(matches!(result, Err(HistoryError::Repository(_))));
    }
}
