use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
};
use std::sync::Arc;
use tokio_util::io::ReaderStream;

use crate::api::errors::ApiError;
use crate::application::use_cases::DownloadOutputUseCase;

/// GET /api/download/{filename}
/// Stream a processed output as an attachment
#[utoipa::path(
    get,
    path = "/api/download/{filename}",
    tag = "tools",
    params(("filename" = String, Path, description = "Name returned in a tool response")),
    responses(
        (status = 200, description = "Output bytes", content_type = "application/octet-stream"),
        (status = 400, description = "Invalid file name"),
        (status = 404, description = "File not found")
    )
)]
pub async fn download_handler(
    State(use_case): State<Arc<DownloadOutputUseCase>>,
    Path(filename): Path<String>,
) -> Result<Response, ApiError> {
    let (metadata, reader) = use_case.execute(&filename).await?;

    let body = Body::from_stream(ReaderStream::new(reader));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_LENGTH, metadata.size_bytes.to_string())
        .header(header::CONTENT_TYPE, metadata.content_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", metadata.file_name),
        )
        .body(body)
        .map_err(|e| ApiError::internal_error(format!("Failed to build response: {}", e)))
}
