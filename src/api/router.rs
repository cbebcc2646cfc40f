use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;

use crate::api::handlers::{
    download_handler, files_handler, get_tool_handler, health_handler, history_handler,
    list_tools_handler, login_handler, me_handler, process_tool_handler, signup_handler,
};
use crate::api::middleware::size_limits::SizeLimitConfig;
use crate::api::middleware::{auth, metrics, size_limits};
use crate::api::openapi::swagger_ui;
use crate::application::ports::TokenService;
use crate::application::use_cases::{
    DownloadOutputUseCase, GetCurrentUserUseCase, LoginUseCase, ProcessToolUseCase,
    SignupUseCase, UsageHistoryUseCase,
};

/// Application state container
#[derive(Clone)]
pub struct AppState {
    pub process_use_case: Arc<ProcessToolUseCase>,
    pub download_use_case: Arc<DownloadOutputUseCase>,
    pub signup_use_case: Arc<SignupUseCase>,
    pub login_use_case: Arc<LoginUseCase>,
    pub current_user_use_case: Arc<GetCurrentUserUseCase>,
    pub history_use_case: Arc<UsageHistoryUseCase>,
    pub token_service: Arc<dyn TokenService>,
    pub size_limits: SizeLimitConfig,
    pub cors_allow_origin: String,
}

fn cors_layer(allow_origin: &str) -> CorsLayer {
    let origin = if allow_origin.trim() == "*" {
        AllowOrigin::from(Any)
    } else {
        let origins: Vec<HeaderValue> = allow_origin
            .split(',')
            .filter_map(|o| HeaderValue::from_str(o.trim()).ok())
            .collect();
        AllowOrigin::list(origins)
    };
    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Create router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let require_auth = axum_middleware::from_fn_with_state(
        Arc::clone(&state.token_service),
        auth::require_auth,
    );
    let optional_auth = axum_middleware::from_fn_with_state(
        Arc::clone(&state.token_service),
        auth::optional_auth,
    );

    Router::new()
        // Health check (no auth required)
        .route("/health", get(health_handler))
        .route("/api/health", get(health_handler))
        // Catalog and processing
        .route("/api/tools", get(list_tools_handler))
        .route(
            "/api/tools/history",
            get(history_handler)
                .with_state(Arc::clone(&state.history_use_case))
                .route_layer(require_auth.clone()),
        )
        .route("/api/tools/{tool_id}", get(get_tool_handler))
        .route(
            "/api/tools/{tool_id}",
            post(process_tool_handler)
                .with_state(state.process_use_case)
                .route_layer(optional_auth),
        )
        .route(
            "/api/download/{filename}",
            get(download_handler).with_state(state.download_use_case),
        )
        // Accounts
        .route(
            "/api/auth/signup",
            post(signup_handler).with_state(state.signup_use_case),
        )
        .route(
            "/api/auth/login",
            post(login_handler).with_state(state.login_use_case),
        )
        .route(
            "/api/auth/me",
            get(me_handler)
                .with_state(state.current_user_use_case)
                .route_layer(require_auth.clone()),
        )
        .route(
            "/api/files",
            get(files_handler)
                .with_state(state.history_use_case)
                .route_layer(require_auth),
        )
        .merge(swagger_ui())
        // Multipart would otherwise stop at axum's 2 MB default
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(
            state.size_limits.max_request_size as usize,
        ))
        .layer(axum_middleware::from_fn_with_state(
            state.size_limits,
            size_limits::request_size_limit,
        ))
        .layer(cors_layer(&state.cors_allow_origin))
        .layer(axum_middleware::from_fn(metrics::metrics_middleware))
}
