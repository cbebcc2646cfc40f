use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::Json,
    Extension,
};
use bytes::BytesMut;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use crate::api::errors::ApiError;
use crate::api::middleware::auth::AuthUser;
use crate::application::dto::{CatalogResponse, ProcessResponse, ToolDto};
use crate::application::use_cases::{IncomingFile, ProcessError, ProcessRequest, ProcessToolUseCase};
use crate::assembly::ToolOptions;
use crate::catalog;
use crate::domain::value_objects::ToolCategory;

/// Multipart body accepted by every tool endpoint
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct ToolUploadForm {
    /// Files to process; the single-file field name `file` is also accepted
    #[schema(value_type = Vec<String>, format = Binary)]
    files: Vec<Vec<u8>>,
    /// JSON object of tool options, e.g. `{"width": 800}`
    metadata: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct CatalogQuery {
    /// Filter by category (PDF, Image, Media, Government, Developer)
    category: Option<String>,
}

fn multipart_error(e: axum::extract::multipart::MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::payload_too_large(e.body_text())
    } else {
        ApiError::bad_request(format!("Failed to parse multipart data: {}", e.body_text()))
    }
}

/// POST /api/tools/{tool_id}
/// Run a tool over the uploaded files and publish its output
#[utoipa::path(
    post,
    path = "/api/tools/{tool_id}",
    tag = "tools",
    params(("tool_id" = String, Path, description = "Catalog id, e.g. pdf-merger")),
    request_body(content = ToolUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Output assembled", body = ProcessResponse),
        (status = 400, description = "File above the per-file limit"),
        (status = 404, description = "Unknown tool"),
        (status = 413, description = "Request body above the ceiling"),
        (status = 422, description = "Invalid tool options"),
        (status = 500, description = "Processing failed")
    )
)]
pub async fn process_tool_handler(
    State(use_case): State<Arc<ProcessToolUseCase>>,
    Path(tool_id): Path<String>,
    auth: Option<Extension<AuthUser>>,
    mut multipart: Multipart,
) -> Result<Json<ProcessResponse>, ApiError> {
    if catalog::resolve(&tool_id).is_none() {
        return Err(ProcessError::UnknownTool(tool_id).into());
    }

    let max_file_size = use_case.max_file_size();
    let mut files = Vec::new();
    let mut options = ToolOptions::new();

    while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or("").to_string();

        if let Some(file_name) = field.file_name().map(|s| s.to_string()) {
            let mime_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();

            // Stop reading as soon as the part crosses the per-file limit
            let mut data = BytesMut::new();
            while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
                data.extend_from_slice(&chunk);
                if data.len() as u64 > max_file_size {
                    tracing::warn!(
                        tool_id = %tool_id,
                        file_name = %file_name,
                        max_file_size,
                        "File size limit exceeded, aborting upload"
                    );
                    return Err(ProcessError::FileTooLarge {
                        name: file_name,
                        size: data.len() as u64,
                        limit: max_file_size,
                    }
                    .into());
                }
            }

            files.push(IncomingFile {
                field: if name.is_empty() { "files".to_string() } else { name },
                original_name: file_name,
                mime_type,
                data: data.freeze(),
            });
            continue;
        }

        let text = field.text().await.map_err(multipart_error)?;
        if name == "metadata" {
            if text.trim().is_empty() {
                continue;
            }
            let value: serde_json::Value = serde_json::from_str(&text).map_err(|e| {
                ApiError::invalid_field(&["body", "metadata"], format!("Invalid JSON: {}", e))
            })?;
            if !value.is_object() {
                return Err(ApiError::invalid_field(
                    &["body", "metadata"],
                    "metadata must be a JSON object",
                ));
            }
            options.merge(value);
        } else if !name.is_empty() {
            options.insert(name, serde_json::Value::String(text));
        }
    }

    let request = ProcessRequest {
        user_id: auth.map(|Extension(AuthUser(identity))| identity.user_id),
        files,
        options,
    };

    let response = use_case.execute(&tool_id, request).await?;
    Ok(Json(response))
}

/// GET /api/tools
/// List the tool catalog
#[utoipa::path(
    get,
    path = "/api/tools",
    tag = "tools",
    params(CatalogQuery),
    responses(
        (status = 200, description = "Tool catalog", body = CatalogResponse),
        (status = 400, description = "Unknown category")
    )
)]
pub async fn list_tools_handler(
    Query(query): Query<CatalogQuery>,
) -> Result<Json<CatalogResponse>, ApiError> {
    let tools: Vec<ToolDto> = match query.category {
        Some(raw) => {
            let category = raw.parse::<ToolCategory>().map_err(ApiError::bad_request)?;
            catalog::by_category(category).map(ToolDto::from).collect()
        }
        None => catalog::all().iter().map(ToolDto::from).collect(),
    };

    Ok(Json(CatalogResponse {
        total: tools.len(),
        tools,
    }))
}

/// GET /api/tools/{tool_id}
#[utoipa::path(
    get,
    path = "/api/tools/{tool_id}",
    tag = "tools",
    params(("tool_id" = String, Path, description = "Catalog id")),
    responses(
        (status = 200, description = "Tool descriptor", body = ToolDto),
        (status = 404, description = "Unknown tool")
    )
)]
pub async fn get_tool_handler(Path(tool_id): Path<String>) -> Result<Json<ToolDto>, ApiError> {
    catalog::resolve(&tool_id)
        .map(|tool| Json(ToolDto::from(tool)))
        .ok_or_else(|| ApiError::not_found(format!("Tool not found: {}", tool_id)))
}
