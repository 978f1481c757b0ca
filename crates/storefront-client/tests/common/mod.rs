//! In-process fake of the storefront backend.
//!
//! Every request is recorded (method, path, `Authorization`, `traceparent`,
//! JSON body) and answered from a small canned route table.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU16, Ordering};
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use parking_lot::Mutex;
use serde_json::{Value, json};

use storefront_client::ClientConfig;

pub const USER_TOKEN: &str = "user-token";
pub const ADMIN_TOKEN: &str = "admin-token";
pub const VALID_RESET_TOKEN: &str = "valid-reset";

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub traceparent: Option<String>,
    pub body: Value,
}

#[derive(Clone, Default)]
pub struct FakeBackend {
    requests: Arc<Mutex<Vec<Recorded>>>,
    analytics_status: Arc<AtomicU16>,
}

impl FakeBackend {
    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<Recorded> {
        self.requests().into_iter().filter(|r| r.path == path).collect()
    }

    /// Make `/analytics/events` answer with `status`.
    pub fn fail_analytics_with(&self, status: StatusCode) {
        self.analytics_status.store(status.as_u16(), Ordering::SeqCst);
    }
}

/// Serve a fresh backend on an ephemeral port.
pub async fn spawn_backend() -> (FakeBackend, ClientConfig) {
    storefront_telemetry::init_test_tracing();
    let backend = FakeBackend::default();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let app = Router::new().fallback(handle).with_state(backend.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (backend, config_for(addr))
}

/// Config pointing at a port nothing listens on.
pub async fn dead_backend() -> ClientConfig {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    config_for(addr)
}

fn config_for(addr: SocketAddr) -> ClientConfig {
    ClientConfig::new(&format!("http://{addr}"))
        .unwrap()
        .with_timeout(Duration::from_secs(2))
}

async fn handle(
    State(backend): State<FakeBackend>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let traceparent = headers
        .get("traceparent")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);

    backend.requests.lock().push(Recorded {
        method: method.to_string(),
        path: uri.path().to_string(),
        authorization: authorization.clone(),
        traceparent,
        body: body.clone(),
    });

    respond(&backend, method.as_str(), uri.path(), authorization.as_deref(), &body)
}

fn respond(
    backend: &FakeBackend,
    method: &str,
    path: &str,
    authorization: Option<&str>,
    body: &Value,
) -> (StatusCode, Json<Value>) {
    let user = json!({ "id": "u1", "email": "asha@example.com", "name": "Asha" });

    match (method, path) {
        ("POST", "/api/analytics/events") => match backend.analytics_status.load(Ordering::SeqCst) {
            0 => (StatusCode::OK, Json(json!({ "status": "recorded" }))),
            code => (
                StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                Json(json!({ "detail": "analytics unavailable" })),
            ),
        },
        ("POST", "/api/auth/login") => {
            if body["password"] == "correct horse" {
                (StatusCode::OK, Json(json!({ "token": USER_TOKEN, "user": user })))
            } else {
                (StatusCode::UNAUTHORIZED, Json(json!({ "detail": "Invalid credentials" })))
            }
        }
        ("POST", "/api/auth/register") => (
            StatusCode::OK,
            Json(json!({ "token": USER_TOKEN, "user": { "id": "u2", "email": body["email"], "name": body["name"] } })),
        ),
        ("GET", "/api/auth/me") => {
            if authorization == Some(format!("Bearer {USER_TOKEN}").as_str()) {
                (StatusCode::OK, Json(user))
            } else {
                (StatusCode::UNAUTHORIZED, Json(json!({ "detail": "Not authenticated" })))
            }
        }
        ("POST", "/api/admin/login") => (
            StatusCode::OK,
            Json(json!({ "token": ADMIN_TOKEN, "username": body["username"], "role": "admin" })),
        ),
        ("POST", "/api/auth/reset-password") => {
            if body["token"] == VALID_RESET_TOKEN {
                (StatusCode::OK, Json(json!({})))
            } else {
                (StatusCode::BAD_REQUEST, Json(json!({ "detail": "Invalid or expired reset token" })))
            }
        }
        ("GET", "/api/cms/privacy-policy") => (
            StatusCode::OK,
            Json(json!({
                "title": "Privacy Policy",
                "content": "## Data\n\nWe keep your **order history**.",
                "meta_description": "How we handle your data",
                "updated_at": "2024-03-15T10:30:00Z",
            })),
        ),
        ("GET", "/api/cms/draft") => (StatusCode::OK, Json(Value::Null)),
        ("GET", p) if p.starts_with("/api/cms/") => {
            (StatusCode::NOT_FOUND, Json(json!({ "detail": "Page not found" })))
        }
        _ => (StatusCode::OK, Json(json!([]))),
    }
}
