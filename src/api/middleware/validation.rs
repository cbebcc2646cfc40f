use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::api::errors::ApiError;

/// JSON body that has passed its `validator` rules.
///
/// Malformed JSON, missing fields and rule failures all reject with 422.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::invalid_field(&["body"], rejection.body_text()))?;
        value.validate()?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::LoginRequest;
    use axum::{body::Body, http::StatusCode, routing::post, Router};
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new().route(
            "/login",
            post(|ValidatedJson(body): ValidatedJson<LoginRequest>| async move { body.email }),
        )
    }

    async fn post_json(body: &str) -> StatusCode {
        app()
            .oneshot(
                axum::http::Request::post("/login")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_valid_body_passes() {
        let status = post_json(r#"{"email":"a@example.com","password":"x"}"#).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_rule_failure_is_422() {
        let status = post_json(r#"{"email":"nope","password":"x"}"#).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_missing_field_is_422() {
        let status = post_json(r#"{"email":"a@example.com"}"#).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_broken_json_is_422() {
        let status = post_json("{").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
