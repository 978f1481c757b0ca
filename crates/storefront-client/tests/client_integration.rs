//! Integration tests for the scoped clients and the auth flows
//!
//! Runs against an in-process axum backend on an ephemeral port.

mod common;

use std::sync::Arc;

use reqwest::StatusCode;
use storefront_client::types::{RegisterRequest, User};
use storefront_client::{ApiClients, ApiError, AuthApi, AuthError, FileStore, KeyValueStore, MemoryStore};

use common::{ADMIN_TOKEN, USER_TOKEN, VALID_RESET_TOKEN, spawn_backend};

fn file_store(dir: &tempfile::TempDir) -> Arc<FileStore> {
    Arc::new(FileStore::open(dir.path().join("storage.json")).unwrap())
}

#[tokio::test]
async fn test_headers_follow_stored_tokens() {
    let (backend, config) = spawn_backend().await;
    let dir = tempfile::tempdir().unwrap();
    let store = file_store(&dir);
    let clients = ApiClients::new(&config, store.clone()).unwrap();

    clients.user.get("orders").await.unwrap();
    clients.admin.get("admin/orders").await.unwrap();

    store.set("token", "shopper").unwrap();
    clients.user.get("orders").await.unwrap();
    clients.admin.get("admin/orders").await.unwrap();

    store.set("adminToken", "root").unwrap();
    store.remove("token").unwrap();
    clients.user.get("orders").await.unwrap();
    clients.admin.get("admin/orders").await.unwrap();

    let user: Vec<_> = backend.requests_to("/api/orders").into_iter().map(|r| r.authorization).collect();
    let admin: Vec<_> = backend.requests_to("/api/admin/orders").into_iter().map(|r| r.authorization).collect();

    assert_eq!(user, vec![None, Some("Bearer shopper".to_string()), None]);
    assert_eq!(admin, vec![None, None, Some("Bearer root".to_string())]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_scoped_requests_do_not_mix() {
    let (backend, config) = spawn_backend().await;
    let store = Arc::new(MemoryStore::new());
    store.set("token", "shopper").unwrap();
    store.set("adminToken", "root").unwrap();
    let clients = ApiClients::new(&config, store).unwrap();

    let mut tasks = tokio::task::JoinSet::new();
    for i in 0..20 {
        let clients = clients.clone();
        tasks.spawn(async move {
            if i % 2 == 0 {
                clients.user.get("orders").await.map(|_| ())
            } else {
                clients.admin.get("admin/orders").await.map(|_| ())
            }
        });
    }
    while let Some(result) = tasks.join_next().await {
        result.unwrap().unwrap();
    }

    let requests = backend.requests();
    assert_eq!(requests.len(), 20);
    for r in requests {
        let expected = if r.path == "/api/orders" { "Bearer shopper" } else { "Bearer root" };
        assert_eq!(r.authorization.as_deref(), Some(expected), "{}", r.path);
    }
}

#[tokio::test]
async fn test_status_errors_carry_detail() {
    let (_backend, config) = spawn_backend().await;
    let clients = ApiClients::new(&config, Arc::new(MemoryStore::new())).unwrap();

    let err = clients.user.get_json::<User>("auth/me").await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    assert_eq!(err.detail(), Some("Not authenticated"));

    // Raw calls hand the status back untouched.
    let response = clients.user.get("auth/me").await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unreachable_backend_is_a_network_error() {
    let config = common::dead_backend().await;
    let clients = ApiClients::new(&config, Arc::new(MemoryStore::new())).unwrap();

    let err = clients.user.get("orders").await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
    assert!(err.is_network());
}

#[tokio::test]
async fn test_login_me_logout() {
    let (backend, config) = spawn_backend().await;
    let dir = tempfile::tempdir().unwrap();
    let store = file_store(&dir);
    let auth = AuthApi::new(ApiClients::new(&config, store.clone()).unwrap(), store.clone());

    let err = auth.login("asha@example.com", "wrong").await.unwrap_err();
    assert_eq!(err.user_message("Login failed"), "Invalid credentials");
    assert_eq!(store.get("token"), None);

    let user = auth.login("asha@example.com", "correct horse").await.unwrap();
    assert_eq!(user.id, "u1");
    assert_eq!(store.get("token").as_deref(), Some(USER_TOKEN));
    assert_eq!(auth.current_user(), Some(user.clone()));

    // The stored token is picked up by the very next request.
    assert_eq!(auth.me().await.unwrap(), user);
    let me = backend.requests_to("/api/auth/me");
    assert_eq!(me[0].authorization.as_deref(), Some("Bearer user-token"));

    auth.logout().unwrap();
    assert_eq!(auth.current_user(), None);
    let err = auth.me().await.unwrap_err();
    match err {
        AuthError::Api(e) => assert_eq!(e.status(), Some(StatusCode::UNAUTHORIZED)),
        other => panic!("expected an API error, got {other}"),
    }
}

#[tokio::test]
async fn test_register_logs_in() {
    let (_backend, config) = spawn_backend().await;
    let store = Arc::new(MemoryStore::new());
    let auth = AuthApi::new(ApiClients::new(&config, store.clone()).unwrap(), store.clone());

    let request = RegisterRequest {
        email: "new@example.com".into(),
        password: "pw".into(),
        name: "Nila".into(),
        phone: None,
    };
    let user = auth.register(&request).await.unwrap();
    assert_eq!(user.email, "new@example.com");
    assert_eq!(store.get("token").as_deref(), Some(USER_TOKEN));
}

#[tokio::test]
async fn test_admin_login_is_separate_from_user() {
    let (backend, config) = spawn_backend().await;
    let store = Arc::new(MemoryStore::new());
    let clients = ApiClients::new(&config, store.clone()).unwrap();
    let auth = AuthApi::new(clients.clone(), store.clone());

    let profile = auth.admin_login("ops", "pw").await.unwrap();
    assert_eq!(profile.role, "admin");
    assert_eq!(store.get("adminToken").as_deref(), Some(ADMIN_TOKEN));
    assert_eq!(store.get("token"), None);
    assert_eq!(auth.current_admin(), Some(profile));

    clients.admin.get("admin/orders").await.unwrap();
    clients.user.get("orders").await.unwrap();
    assert_eq!(
        backend.requests_to("/api/admin/orders")[0].authorization.as_deref(),
        Some("Bearer admin-token")
    );
    assert_eq!(backend.requests_to("/api/orders")[0].authorization, None);

    auth.admin_logout().unwrap();
    assert_eq!(auth.current_admin(), None);
}

#[tokio::test]
async fn test_reset_password() {
    let (backend, config) = spawn_backend().await;
    let store = Arc::new(MemoryStore::new());
    let auth = AuthApi::new(ApiClients::new(&config, store.clone()).unwrap(), store);

    auth.reset_password(VALID_RESET_TOKEN, "n3w-pass").await.unwrap();
    let sent = &backend.requests_to("/api/auth/reset-password")[0];
    assert_eq!(sent.body, serde_json::json!({ "token": VALID_RESET_TOKEN, "new_password": "n3w-pass" }));

    let err = auth.reset_password("stale", "n3w-pass").await.unwrap_err();
    assert_eq!(err.user_message("Reset failed"), "Invalid or expired reset token");
}
