use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{ToolCategory, UserId};

/// Usage record before the repository assigns an id.
#[derive(Debug, Clone)]
pub struct NewToolUsage {
    pub user_id: Option<UserId>,
    pub tool_id: String,
    pub category: ToolCategory,
    pub file_name: Option<String>,
    pub file_size: Option<u64>,
    pub processing_time_ms: u64,
    pub success: bool,
    pub metadata: serde_json::Value,
}

/// One tool invocation. `user_id` is `None` for anonymous requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolUsage {
    pub id: u64,
    pub user_id: Option<UserId>,
    pub tool_id: String,
    pub category: ToolCategory,
    pub file_name: Option<String>,
    pub file_size: Option<u64>,
    pub processing_time_ms: u64,
    pub success: bool,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl ToolUsage {
    pub fn record(id: u64, usage: NewToolUsage) -> Self {
        Self {
            id,
            user_id: usage.user_id,
            tool_id: usage.tool_id,
            category: usage.category,
            file_name: usage.file_name,
            file_size: usage.file_size,
            processing_time_ms: usage.processing_time_ms,
            success: usage.success,
            metadata: usage.metadata,
            created_at: Utc::now(),
        }
    }
}
