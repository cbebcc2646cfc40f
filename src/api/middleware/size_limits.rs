use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use crate::api::errors::ApiError;

/// Request body ceiling shared with the router's body limit layer
#[derive(Debug, Clone, Copy)]
pub struct SizeLimitConfig {
    pub max_request_size: u64,
}

fn parse_content_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get("content-length")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.parse::<u64>().ok())
}

/// Fails fast with 413 when the declared body is above the ceiling.
///
/// Bodies without Content-Length are capped while streaming by the
/// `RequestBodyLimitLayer` installed next to this middleware.
pub async fn request_size_limit(
    State(config): State<SizeLimitConfig>,
    request: Request,
    next: Next,
) -> Response {
    if let Some(length) = parse_content_length(request.headers()) {
        if length > config.max_request_size {
            tracing::warn!(
                content_length = length,
                max_request_size = config.max_request_size,
                "Rejected oversized request"
            );
            return ApiError::payload_too_large(format!(
                "Request body too large (max {} bytes)",
                config.max_request_size
            ))
            .into_response();
        }
    }

    next.run(request).await
}
