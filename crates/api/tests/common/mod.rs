#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use roster_api::config::{ServerConfig, StoreBackend};
use roster_api::router::build_app_router;
use roster_api::state::AppState;
use roster_api::uploads::UploadStore;
use roster_db::memory::MemoryEmployeeStore;
use roster_db::store::EmployeeStore;
use tempfile::TempDir;
use tower::ServiceExt;

pub const TEST_ORIGIN: &str = "http://localhost:3000";

const BOUNDARY: &str = "roster-test-boundary";

/// Build a test `ServerConfig` writing uploads to `upload_dir`.
pub fn test_config(upload_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![TEST_ORIGIN.to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        upload_dir: upload_dir.to_path_buf(),
        max_upload_files: 3,
        max_upload_bytes: 1024 * 1024,
        store_backend: StoreBackend::Memory,
    }
}

/// A router over an in-memory store plus handles to inspect its effects.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryEmployeeStore>,
    /// Dropped with the app; removes every upload the test produced.
    pub upload_dir: TempDir,
}

impl TestApp {
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    /// Files currently in the upload directory.
    pub fn uploaded_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = std::fs::read_dir(self.upload_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect();
        files.sort();
        files
    }
}

/// Build the full application router, with the same middleware stack as
/// `main.rs`, over a fresh in-memory store.
pub fn build_test_app() -> TestApp {
    let store = Arc::new(MemoryEmployeeStore::new());
    let upload_dir = tempfile::tempdir().unwrap();
    let config = test_config(upload_dir.path());

    let state = AppState {
        store: Arc::clone(&store) as Arc<dyn EmployeeStore>,
        uploads: Arc::new(UploadStore::new(upload_dir.path())),
        config: Arc::new(config.clone()),
    };

    TestApp {
        router: build_app_router(state, &config),
        store,
        upload_dir,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, Body::empty(), None).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Body::empty(), None).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(
        app,
        Method::PUT,
        uri,
        Body::from(body.to_string()),
        Some("application/json".to_string()),
    )
    .await
}

/// Send `body` as-is with an optional `Content-Type`.
pub async fn send_raw(
    app: Router,
    method: Method,
    uri: &str,
    body: &str,
    content_type: Option<&str>,
) -> Response<Body> {
    send(
        app,
        method,
        uri,
        Body::from(body.to_string()),
        content_type.map(str::to_string),
    )
    .await
}

/// One part of a multipart request.
pub enum Part<'a> {
    Text(&'a str, &'a str),
    /// `(field, file name, bytes)`
    File(&'a str, &'a str, &'a [u8]),
}

pub async fn post_multipart(app: Router, uri: &str, parts: &[Part<'_>]) -> Response<Body> {
    send(
        app,
        Method::POST,
        uri,
        Body::from(multipart_body(parts)),
        Some(format!("multipart/form-data; boundary={BOUNDARY}")),
    )
    .await
}

/// Create an employee with text fields only and return its id.
pub async fn create_employee(app: Router, name: &str, age: &str, designation: &str) -> i64 {
    let response = post_multipart(
        app,
        "/api/employees",
        &[
            Part::Text("name", name),
            Part::Text("age", age),
            Part::Text("designation", designation),
            Part::Text("details", ""),
        ],
    )
    .await;
    assert_eq!(response.status(), 201, "create {name} failed");
    body_json(response).await["id"].as_i64().unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Body,
    content_type: Option<String>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header("Content-Type", content_type);
    }
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File(name, file_name, data) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}
