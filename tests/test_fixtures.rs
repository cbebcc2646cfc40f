//! Shared test fixtures and utilities for all test types
//!
//! Every environment owns a fresh uploads directory and in-memory state.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use suntyn_tools::api::{create_router, AppState};
use suntyn_tools::application::builder::{Application, ApplicationBuilder};
use suntyn_tools::infrastructure::security::HashParams;
use suntyn_tools::Config;

pub const BOUNDARY: &str = "suntyn-test-boundary";

/// Per-file limit used by every test environment
pub const TEST_MAX_FILE_SIZE: u64 = 64 * 1024;

/// Body ceiling used by every test environment
pub const TEST_MAX_REQUEST_SIZE: u64 = 256 * 1024;

pub struct TestEnvironment {
    pub app: Application,
    pub uploads_dir: TempDir,
}

impl TestEnvironment {
    pub async fn new() -> Self {
        let uploads_dir = TempDir::new().expect("Failed to create temp dir");
        let mut config = Config::for_uploads_dir(uploads_dir.path().to_path_buf());
        config.max_file_size_bytes = TEST_MAX_FILE_SIZE;
        config.max_request_size_bytes = TEST_MAX_REQUEST_SIZE;
        config.jwt_secret = Some("integration-test-secret-0123456789".to_string());

        let app = ApplicationBuilder::new(config)
            .with_hash_params(HashParams::fast())
            .with_storage()
            .await
            .expect("Failed to initialize storage")
            .with_persistence()
            .with_security()
            .build()
            .expect("Failed to build application");

        Self { app, uploads_dir }
    }

    pub fn state(&self) -> AppState {
        self.app.state.clone()
    }

    pub fn router(&self) -> Router {
        create_router(self.state())
    }

    pub fn processed_path(&self, file_name: &str) -> std::path::PathBuf {
        self.uploads_dir.path().join("processed").join(file_name)
    }

    /// Files in the uploads root, excluding the `processed/` and `tmp/` layout
    pub fn stored_uploads(&self) -> Vec<std::path::PathBuf> {
        std::fs::read_dir(self.uploads_dir.path())
            .expect("uploads dir readable")
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .collect()
    }
}

/// One multipart part
pub enum Part<'a> {
    File {
        field: &'a str,
        file_name: &'a str,
        content_type: &'a str,
        data: &'a [u8],
    },
    Text {
        field: &'a str,
        value: &'a str,
    },
}

pub fn file_part<'a>(file_name: &'a str, content_type: &'a str, data: &'a [u8]) -> Part<'a> {
    Part::File {
        field: "files",
        file_name,
        content_type,
        data,
    }
}

pub fn metadata_part(value: &str) -> Part<'_> {
    Part::Text {
        field: "metadata",
        value,
    }
}

/// Encode `parts` as a `multipart/form-data` body using [`BOUNDARY`]
pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            Part::File {
                field,
                file_name,
                content_type,
                data,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                         Content-Type: {}\r\n\r\n",
                        field, file_name, content_type
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            }
            Part::Text { field, value } => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", field)
                        .as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn tool_request(tool_id: &str, parts: &[Part<'_>], token: Option<&str>) -> Request<Body> {
    let body = multipart_body(parts);
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(format!("/api/tools/{}", tool_id))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .header(header::CONTENT_LENGTH, body.len());
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body)).unwrap()
}

pub fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

/// Send one request through a fresh router and return status plus raw body
pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

pub async fn send_json(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, body) = send(router, request).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or_else(|_| {
            panic!("expected JSON body, got: {}", String::from_utf8_lossy(&body))
        })
    };
    (status, value)
}

/// Sign up a user and return the issued token
pub async fn signup(env: &TestEnvironment, email: &str, password: &str) -> String {
    let (status, body) = send_json(
        env.router(),
        json_request(
            Method::POST,
            "/api/auth/signup",
            json!({ "email": email, "password": password, "name": "Test User" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "signup failed: {}", body);
    body["token"].as_str().unwrap().to_string()
}

pub mod assertions {
    /// Leading bytes every output of a given extension starts with
    pub fn assert_magic(extension: &str, bytes: &[u8]) {
        match extension {
            "pdf" => assert!(bytes.starts_with(b"%PDF-1."), "not a PDF"),
            "png" => assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"), "not a PNG"),
            "mp3" => assert!(bytes.starts_with(b"ID3"), "not an MP3 with ID3 tag"),
            "mp4" => assert_eq!(&bytes[4..8], b"ftyp", "not an MP4"),
            "json" => {
                serde_json::from_slice::<serde_json::Value>(bytes).expect("not JSON");
            }
            "svg" => assert!(
                String::from_utf8_lossy(bytes).contains("<svg"),
                "not an SVG"
            ),
            _ => assert!(!bytes.is_empty(), "empty output"),
        }
    }
}
