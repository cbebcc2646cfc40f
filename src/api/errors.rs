use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use validator::ValidationErrors;

use crate::application::use_cases::{AuthError, DownloadError, HistoryError, ProcessError};
use crate::assembly::AssemblyError;

/// API error response
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: Value,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: json!({ "error": message.into() }),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn payload_too_large(message: impl Into<String>) -> Self {
        Self::new(StatusCode::PAYLOAD_TOO_LARGE, message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// 422 with one `{loc, msg, type}` entry per failed field
    pub fn validation(detail: Vec<Value>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            body: json!({ "detail": detail }),
        }
    }

    pub fn invalid_field(loc: &[&str], msg: impl Into<String>) -> Self {
        Self::validation(vec![json!({
            "loc": loc,
            "msg": msg.into(),
            "type": "value_error",
        })])
    }

    /// 500 in the tool envelope shape
    pub fn processing(error: impl std::fmt::Display) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: json!({
                "success": false,
                "message": "Processing failed",
                "error": error.to_string(),
            }),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

// Convert use case errors to API errors

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut detail: Vec<Value> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    json!({
                        "loc": ["body", field],
                        "msg": e
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| "Invalid value".to_string()),
                        "type": format!("value_error.{}", e.code),
                    })
                })
            })
            .collect();
        // HashMap order is unstable
        detail.sort_by(|a, b| a["loc"].to_string().cmp(&b["loc"].to_string()));
        Self::validation(detail)
    }
}

impl From<ProcessError> for ApiError {
    fn from(err: ProcessError) -> Self {
        match err {
            ProcessError::UnknownTool(id) => ApiError::not_found(format!("Tool not found: {}", id)),
            e @ ProcessError::FileTooLarge { .. } => ApiError::bad_request(e.to_string()),
            ProcessError::Assembly(AssemblyError::InvalidOption { name, reason }) => {
                ApiError::invalid_field(&["body", "metadata", name.as_str()], reason)
            }
            ProcessError::Assembly(e) => ApiError::processing(e),
            ProcessError::Storage(e) => {
                tracing::error!(error = %e, "Storage failure while processing");
                ApiError::processing(e)
            }
            ProcessError::Repository(e) => ApiError::processing(e),
        }
    }
}

impl From<DownloadError> for ApiError {
    fn from(err: DownloadError) -> Self {
        match err {
            DownloadError::InvalidName(name) => {
                ApiError::bad_request(format!("Invalid file name: {}", name))
            }
            DownloadError::NotFound(_) => ApiError::not_found("File not found"),
            DownloadError::Storage(e) => ApiError::internal_error(format!("Storage error: {}", e)),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Domain(e) => ApiError::invalid_field(&["body", "email"], e.to_string()),
            AuthError::EmailTaken => ApiError::bad_request("User already exists with this email"),
            AuthError::InvalidCredentials => ApiError::unauthorized("Invalid email or password"),
            AuthError::UserNotFound => ApiError::not_found("User not found"),
            AuthError::Credential(e) => {
                tracing::error!(error = %e, "Credential failure");
                ApiError::internal_error("Authentication failed")
            }
            AuthError::Repository(e) => {
                ApiError::internal_error(format!("Repository error: {}", e))
            }
        }
    }
}

impl From<HistoryError> for ApiError {
    fn from(err: HistoryError) -> Self {
        match err {
            HistoryError::Repository(e) => {
                ApiError::internal_error(format!("Repository error: {}", e))
            }
        }
    }
}
