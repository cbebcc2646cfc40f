use axum::{extract::State, response::Json, Extension};
use std::sync::Arc;

use crate::api::errors::ApiError;
use crate::api::middleware::auth::AuthUser;
use crate::application::dto::{FilesResponse, HistoryResponse};
use crate::application::use_cases::UsageHistoryUseCase;

/// GET /api/tools/history
#[utoipa::path(
    get,
    path = "/api/tools/history",
    tag = "history",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Recent tool usage, newest first", body = HistoryResponse),
        (status = 401, description = "Access token required"),
        (status = 403, description = "Invalid or expired token")
    )
)]
pub async fn history_handler(
    State(use_case): State<Arc<UsageHistoryUseCase>>,
    Extension(AuthUser(identity)): Extension<AuthUser>,
) -> Result<Json<HistoryResponse>, ApiError> {
    Ok(Json(use_case.history(identity.user_id).await?))
}

/// GET /api/files
#[utoipa::path(
    get,
    path = "/api/files",
    tag = "history",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Uploads still retained", body = FilesResponse),
        (status = 401, description = "Access token required"),
        (status = 403, description = "Invalid or expired token")
    )
)]
pub async fn files_handler(
    State(use_case): State<Arc<UsageHistoryUseCase>>,
    Extension(AuthUser(identity)): Extension<AuthUser>,
) -> Result<Json<FilesResponse>, ApiError> {
    Ok(Json(use_case.files(identity.user_id).await?))
}
