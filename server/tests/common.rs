//! Common utilities for integration tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::{to_bytes, Body, Bytes},
    extract::State,
    http::{header, HeaderMap, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::Value;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tower::ServiceExt;

use server::config::ServerConfig;
use server::{build_app, AppState};

pub const TEST_KEY: &str = "sk-test-key";
pub const INDEX_HTML: &str = "<!doctype html><title>flashcards</title>";
pub const APP_JS: &str = "console.log('app');";

/// How the fake MiniMax endpoint answers
#[derive(Clone)]
pub enum Upstream {
    Json(Value),
    Raw(&'static str),
    Status(StatusCode),
    Hang(Duration),
}

/// What the fake endpoint saw
#[derive(Debug, Clone)]
pub struct Captured {
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct FakeState {
    behavior: Upstream,
    captured: Arc<Mutex<Vec<Captured>>>,
}

pub struct FakeUpstream {
    pub url: String,
    captured: Arc<Mutex<Vec<Captured>>>,
}

impl FakeUpstream {
    pub fn calls(&self) -> Vec<Captured> {
        self.captured.lock().unwrap().clone()
    }
}

async fn fake_t2a(State(fake): State<FakeState>, headers: HeaderMap, body: Bytes) -> Response {
    let header_str = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
    };
    fake.captured.lock().unwrap().push(Captured {
        authorization: header_str(header::AUTHORIZATION),
        content_type: header_str(header::CONTENT_TYPE),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    });

    match fake.behavior {
        Upstream::Json(v) => Json(v).into_response(),
        Upstream::Raw(s) => (StatusCode::OK, s).into_response(),
        Upstream::Status(code) => (code, "upstream failure").into_response(),
        Upstream::Hang(d) => {
            tokio::time::sleep(d).await;
            Json(serde_json::json!({})).into_response()
        }
    }
}

/// Serve a fake `/v1/t2a_v2` on an ephemeral local port
pub async fn spawn_upstream(behavior: Upstream) -> FakeUpstream {
    let captured = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/v1/t2a_v2", post(fake_t2a))
        .with_state(FakeState {
            behavior,
            captured: captured.clone(),
        });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeUpstream {
        url: format!("http://{addr}/v1/t2a_v2"),
        captured,
    }
}

/// A local URL nothing listens on
pub fn refused_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}/v1/t2a_v2")
}

pub fn static_site() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), INDEX_HTML).unwrap();
    std::fs::write(dir.path().join("app.js"), APP_JS).unwrap();
    dir
}

pub struct TestApp {
    pub router: Router,
    // Kept alive for the static file routes
    pub site: TempDir,
}

pub fn test_config(api_url: &str, api_key: Option<&str>, site: &TempDir) -> ServerConfig {
    ServerConfig {
        api_key: api_key.map(|k| k.to_string()),
        api_url: api_url.to_string(),
        static_dir: site.path().to_path_buf(),
        ..ServerConfig::default()
    }
}

pub fn app_from_config(config: ServerConfig, site: TempDir, timeout: Duration) -> TestApp {
    let config = ServerConfig {
        tts_timeout_secs: timeout.as_secs(),
        ..config
    };
    let tts = tts_core::MinimaxClient::with_endpoint(
        config.api_key.clone(),
        config.api_url.clone(),
        timeout,
    )
    .expect("failed to build MiniMax client");
    TestApp {
        router: build_app(AppState::new(tts), &config),
        site,
    }
}

/// App wired to `api_url` with the test key and a 2 second upstream timeout
pub fn create_test_app(api_url: &str) -> TestApp {
    let site = static_site();
    let config = test_config(api_url, Some(TEST_KEY), &site);
    app_from_config(config, site, Duration::from_secs(2))
}

pub async fn post_tts(app: &TestApp, body: impl Into<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/tts")
                .header("content-type", "application/json")
                .body(body.into())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, headers, json)
}

pub async fn get(app: &TestApp, uri: &str) -> (StatusCode, HeaderMap, Bytes) {
    let response = app
        .router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, body)
}
