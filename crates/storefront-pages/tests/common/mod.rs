//! Fake CMS/auth/analytics backend for page tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use parking_lot::Mutex;
use serde_json::{Value, json};

use storefront_client::{ClientConfig, MemoryStore};
use storefront_pages::AppContext;

pub const VALID_RESET_TOKEN: &str = "valid-reset";

#[derive(Clone, Default)]
pub struct Backend {
    requests: Arc<Mutex<Vec<(String, String, Value)>>>,
}

impl Backend {
    /// `(method, path)` of every request, in arrival order.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.requests.lock().iter().map(|(m, p, _)| (m.clone(), p.clone())).collect()
    }

    pub fn bodies_to(&self, path: &str) -> Vec<Value> {
        self.requests
            .lock()
            .iter()
            .filter(|(_, p, _)| p == path)
            .map(|(_, _, b)| b.clone())
            .collect()
    }

    pub fn count_to(&self, path: &str) -> usize {
        self.bodies_to(path).len()
    }
}

/// A context wired to a fresh fake backend, with in-memory storage.
pub async fn spawn_context() -> (Backend, AppContext) {
    storefront_telemetry::init_test_tracing();
    let backend = Backend::default();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new().fallback(handle).with_state(backend.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let config = ClientConfig::new(&format!("http://{addr}"))
        .unwrap()
        .with_timeout(Duration::from_secs(2));
    let ctx = AppContext::new(config, Arc::new(MemoryStore::new()), Arc::new(MemoryStore::new())).unwrap();
    (backend, ctx)
}

async fn handle(State(backend): State<Backend>, method: Method, uri: Uri, body: Bytes) -> (StatusCode, Json<Value>) {
    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    backend
        .requests
        .lock()
        .push((method.to_string(), uri.path().to_string(), body.clone()));

    match (method.as_str(), uri.path()) {
        ("POST", "/api/analytics/events") => (StatusCode::OK, Json(json!({ "status": "recorded" }))),
        ("GET", "/api/cms/privacy-policy") => (
            StatusCode::OK,
            Json(json!({
                "id": "c1",
                "slug": "privacy-policy",
                "title": "Privacy Policy",
                "content": "## Data\n\nWe keep your **order history**.",
                "meta_description": "How we handle your data",
                "updated_at": "2024-03-15T10:30:00Z",
            })),
        ),
        ("GET", "/api/cms/return-policy") => (
            StatusCode::OK,
            Json(json!({
                "title": "Return Policy",
                "content": "Returns within 7 days.",
                "updated_at": "2025-01-15T10:30:00.123000",
            })),
        ),
        ("GET", "/api/cms/shipping-info") => (
            StatusCode::OK,
            Json(json!({
                "title": "Shipping",
                "content": "We ship everywhere.",
                "updated_at": "sometime",
            })),
        ),
        ("GET", "/api/cms/draft") => (StatusCode::OK, Json(Value::Null)),
        ("GET", "/api/cms/broken") => (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "detail": "boom" }))),
        ("GET", p) if p.starts_with("/api/cms/") => {
            (StatusCode::NOT_FOUND, Json(json!({ "detail": "Page not found" })))
        }
        ("POST", "/api/auth/reset-password") => {
            if body["token"] == VALID_RESET_TOKEN {
                (StatusCode::OK, Json(json!({})))
            } else if body["token"] == "validation" {
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({ "detail": [{ "loc": ["body", "new_password"], "msg": "Password too short", "type": "value_error" }] })),
                )
            } else if body["token"] == "no-detail" {
                (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": "oops" })))
            } else {
                (StatusCode::BAD_REQUEST, Json(json!({ "detail": "Invalid or expired reset token" })))
            }
        }
        _ => (StatusCode::OK, Json(json!({}))),
    }
}
