use axum::{http::StatusCode, response::Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::catalog;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: String,
    pub tools: usize,
}

/// GET /health and /api/health
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_handler() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            service: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            tools: catalog::all().len(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_reports_catalog_size() {
        let (status, Json(body)) = health_handler().await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.status, "healthy");
        assert_eq!(body.tools, catalog::all().len());
    }
}
