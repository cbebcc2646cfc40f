use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::ports::UsageStats;
use crate::catalog::ToolDescriptor;
use crate::domain::entities::{ToolUsage, User, UserFile};
use crate::domain::value_objects::{OutputFormat, ToolCategory};

/// Envelope returned by every tool endpoint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProcessResponse {
    pub success: bool,
    pub message: String,
    pub download_url: String,
    pub filename: String,
    /// Wall-clock handling time in milliseconds
    pub processing_time: u64,
    #[schema(value_type = Object)]
    pub metadata: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct UserDto {
    pub id: u64,
    pub email: String,
    pub name: String,
    pub created_at: String,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().value(),
            email: user.email().to_string(),
            name: user.name().to_string(),
            created_at: user.created_at().to_rfc3339(),
        }
    }
}

/// Body of signup and login responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub user: UserDto,
    pub token: String,
    pub token_type: String,
}

impl AuthResponse {
    pub fn bearer(user: &User, token: String) -> Self {
        Self {
            user: UserDto::from(user),
            token,
            token_type: "bearer".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SignupRequest {
    #[validate(email(message = "value is not a valid email address"))]
    pub email: String,
    #[validate(length(min = 6, max = 128, message = "password must be 6-128 characters"))]
    pub password: String,
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "value is not a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Catalog entry as exposed over HTTP
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToolDto {
    pub id: String,
    pub name: String,
    pub category: ToolCategory,
    pub output_extension: String,
    pub output_mime_type: String,
    pub endpoint: String,
}

impl From<&ToolDescriptor> for ToolDto {
    fn from(tool: &ToolDescriptor) -> Self {
        let format: OutputFormat = tool.output_format();
        Self {
            id: tool.id.to_string(),
            name: tool.name.to_string(),
            category: tool.category,
            output_extension: format.extension().to_string(),
            output_mime_type: format.mime_type().to_string(),
            endpoint: format!("/api/tools/{}", tool.id),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CatalogResponse {
    pub tools: Vec<ToolDto>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UsageDto {
    pub id: u64,
    pub tool_id: String,
    pub category: ToolCategory,
    pub file_name: Option<String>,
    pub file_size: Option<u64>,
    pub processing_time_ms: u64,
    pub success: bool,
    #[schema(value_type = Object)]
    pub metadata: serde_json::Value,
    pub created_at: String,
}

impl From<ToolUsage> for UsageDto {
    fn from(usage: ToolUsage) -> Self {
        Self {
            id: usage.id,
            tool_id: usage.tool_id,
            category: usage.category,
            file_name: usage.file_name,
            file_size: usage.file_size,
            processing_time_ms: usage.processing_time_ms,
            success: usage.success,
            metadata: usage.metadata,
            created_at: usage.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct UsageStatsDto {
    pub files_processed: u64,
    pub tools_used: u64,
    pub total_time_ms: u64,
}

impl From<UsageStats> for UsageStatsDto {
    fn from(stats: UsageStats) -> Self {
        Self {
            files_processed: stats.files_processed,
            tools_used: stats.tools_used,
            total_time_ms: stats.total_time_ms,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HistoryResponse {
    pub history: Vec<UsageDto>,
    pub stats: UsageStatsDto,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserFileDto {
    pub id: u64,
    pub original_name: String,
    pub stored_name: String,
    pub mime_type: String,
    pub size: u64,
    pub expires_at: String,
    pub created_at: String,
}

impl From<UserFile> for UserFileDto {
    fn from(file: UserFile) -> Self {
        Self {
            id: file.id,
            original_name: file.original_name,
            stored_name: file.stored_name,
            mime_type: file.mime_type,
            size: file.size,
            expires_at: file.expires_at.to_rfc3339(),
            created_at: file.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FilesResponse {
    pub files: Vec<UserFileDto>,
}

/// Headers needed to stream a processed output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadMetadata {
    pub file_name: String,
    pub size_bytes: u64,
    pub content_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    #[test]
    fn process_response_uses_camel_case() {
        let response = ProcessResponse {
            success: true,
            message: "done".to_string(),
            download_url: "/api/download/processed-pdf-merger.pdf".to_string(),
            filename: "processed-pdf-merger.pdf".to_string(),
            processing_time: 12,
            metadata: serde_json::json!({}),
        };
        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("downloadUrl").is_some());
        assert!(value.get("processingTime").is_some());
        assert!(value.get("download_url").is_none());
    }

    #[test]
    fn tool_dto_points_at_its_endpoint() {
        let tool = catalog::resolve("pan-validator").unwrap();
        let dto = ToolDto::from(tool);
        assert_eq!(dto.endpoint, "/api/tools/pan-validator");
        assert_eq!(dto.output_extension, "pdf");
        assert_eq!(dto.category, ToolCategory::Government);
    }

    #[test]
    fn signup_request_validation() {
        let ok = SignupRequest {
            email: "a@example.com".to_string(),
            password: "secret1".to_string(),
            name: "A".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad = SignupRequest {
            email: "nope".to_string(),
            password: "123".to_string(),
            name: String::new(),
        };
        let errors = bad.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
        assert!(fields.contains_key("name"));
    }
}
