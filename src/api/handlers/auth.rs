use axum::{extract::State, http::StatusCode, response::Json, Extension};
use std::sync::Arc;

use crate::api::errors::ApiError;
use crate::api::middleware::auth::AuthUser;
use crate::api::middleware::validation::ValidatedJson;
use crate::application::dto::{AuthResponse, LoginRequest, SignupRequest, UserDto};
use crate::application::use_cases::{GetCurrentUserUseCase, LoginUseCase, SignupUseCase};

/// POST /api/auth/signup
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    tag = "auth",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Email already registered"),
        (status = 422, description = "Invalid request body")
    )
)]
pub async fn signup_handler(
    State(use_case): State<Arc<SignupUseCase>>,
    ValidatedJson(request): ValidatedJson<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let response = use_case.execute(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = AuthResponse),
        (status = 401, description = "Invalid email or password"),
        (status = 422, description = "Invalid request body")
    )
)]
pub async fn login_handler(
    State(use_case): State<Arc<LoginUseCase>>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    Ok(Json(use_case.execute(request).await?))
}

/// GET /api/auth/me
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "auth",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Current user", body = UserDto),
        (status = 401, description = "Access token required"),
        (status = 403, description = "Invalid or expired token")
    )
)]
pub async fn me_handler(
    State(use_case): State<Arc<GetCurrentUserUseCase>>,
    Extension(AuthUser(identity)): Extension<AuthUser>,
) -> Result<Json<UserDto>, ApiError> {
    Ok(Json(use_case.execute(identity.user_id).await?))
}
