use async_trait::async_trait;
#[cfg(test)]
use mockall::{automock, predicate::*};

use crate::application::ports::RepositoryError;
use crate::domain::entities::{NewToolUsage, ToolUsage};
use crate::domain::value_objects::UserId;

/// Aggregates over one user's usage records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UsageStats {
    pub files_processed: u64,
    pub tools_used: u64,
    pub total_time_ms: u64,
}

/// Port for tool usage history
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ToolUsageRepository: Send + Sync {
    async fn record(&self, usage: NewToolUsage) -> Result<ToolUsage, RepositoryError>;

    /// Newest first, at most `limit` entries.
    async fn list_for_user(
        &self,
        user_id: UserId,
        limit: usize,
    ) -> Result<Vec<ToolUsage>, RepositoryError>;

    async fn stats_for_user(&self, user_id: UserId) -> Result<UsageStats, RepositoryError>;
}
