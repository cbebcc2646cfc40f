use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::application::ports::{RepositoryError, ToolUsageRepository, UsageStats};
use crate::domain::entities::{NewToolUsage, ToolUsage};
use crate::domain::value_objects::UserId;

/// Process-local usage history keyed by record id
#[derive(Default)]
pub struct InMemoryToolUsageRepository {
    next_id: AtomicU64,
    records: DashMap<u64, ToolUsage>,
}

impl InMemoryToolUsageRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn for_user(&self, user_id: UserId) -> Vec<ToolUsage> {
        self.records
            .iter()
            .filter(|entry| entry.user_id == Some(user_id))
            .map(|entry| entry.value().clone())
            .collect()
    }
}

#[async_trait]
impl ToolUsageRepository for InMemoryToolUsageRepository {
    async fn record(&self, usage: NewToolUsage) -> Result<ToolUsage, RepositoryError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let usage = ToolUsage::record(id, usage);
        self.records.insert(id, usage.clone());
        Ok(usage)
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
        limit: usize,
    ) -> Result<Vec<ToolUsage>, RepositoryError> {
        let mut usages = self.for_user(user_id);
        // Ids break ties between records created in the same instant.
        usages.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        usages.truncate(limit);
        Ok(usages)
    }

    async fn stats_for_user(&self, user_id: UserId) -> Result<UsageStats, RepositoryError> {
        let usages = self.for_user(user_id);
        let tools: HashSet<&str> = usages.iter().map(|u| u.tool_id.as_str()).collect();

        Ok(UsageStats {
            files_processed: usages.len() as u64,
            tools_used: tools.len() as u64,
            total_time_ms: usages.iter().map(|u| u.processing_time_ms).sum(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::ToolCategory;

    fn usage(user: Option<u64>, tool: &str, ms: u64) -> NewToolUsage {
        NewToolUsage {
            user_id: user.map(UserId::new),
            tool_id: tool.to_string(),
            category: ToolCategory::Pdf,
            file_name: None,
            file_size: None,
            processing_time_ms: ms,
            success: true,
            metadata: serde_json::Value::Null,
        }
    }

    #[tokio::test]
    async fn test_history_is_newest_first_and_limited() {
        let repo = InMemoryToolUsageRepository::new();
        repo.record(usage(Some(1), "pdf-merger", 5)).await.unwrap();
        repo.record(usage(Some(1), "pdf-splitter", 7)).await.unwrap();
        repo.record(usage(Some(1), "pdf-merger", 9)).await.unwrap();
        repo.record(usage(Some(2), "pdf-merger", 100)).await.unwrap();
        repo.record(usage(None, "pdf-merger", 100)).await.unwrap();

        let history = repo.list_for_user(UserId::new(1), 2).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].processing_time_ms, 9);
        assert_eq!(history[1].processing_time_ms, 7);
    }

    #[tokio::test]
    async fn test_stats() {
        let repo = InMemoryToolUsageRepository::new();
        repo.record(usage(Some(1), "pdf-merger", 5)).await.unwrap();
        repo.record(usage(Some(1), "pdf-merger", 7)).await.unwrap();
        repo.record(usage(Some(1), "qr-generator", 1)).await.unwrap();
        repo.record(usage(None, "qr-generator", 50)).await.unwrap();

        let stats = repo.stats_for_user(UserId::new(1)).await.unwrap();
        assert_eq!(
            stats,
            UsageStats {
                files_processed: 3,
                tools_used: 2,
                total_time_ms: 13
            }
        );
        assert_eq!(
            repo.stats_for_user(UserId::new(9)).await.unwrap(),
            UsageStats::default()
        );
    }
}
