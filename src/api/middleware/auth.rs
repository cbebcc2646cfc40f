use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::api::errors::ApiError;
use crate::application::ports::{TokenIdentity, TokenService};

/// Verified caller, inserted into request extensions
#[derive(Debug, Clone)]
pub struct AuthUser(pub TokenIdentity);

/// Bearer token from the Authorization header, if one is present
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Rejects requests without a valid token: 401 when missing, 403 when invalid or expired
pub async fn require_auth(
    State(tokens): State<Arc<dyn TokenService>>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = bearer_token(request.headers()) else {
        return ApiError::unauthorized("Access token required").into_response();
    };

    match tokens.verify(token) {
        Ok(identity) => {
            request.extensions_mut().insert(AuthUser(identity));
            next.run(request).await
        }
        Err(e) => {
            tracing::debug!(error = %e, "Rejected bearer token");
            ApiError::forbidden("Invalid or expired token").into_response()
        }
    }
}

/// Attaches the caller when a valid token is supplied; otherwise continues anonymously
pub async fn optional_auth(
    State(tokens): State<Arc<dyn TokenService>>,
    mut request: Request,
    next: Next,
) -> Response {
    let identity = bearer_token(request.headers()).and_then(|t| tokens.verify(t).ok());
    if let Some(identity) = identity {
        request.extensions_mut().insert(AuthUser(identity));
    }
    next.run(request).await
}
