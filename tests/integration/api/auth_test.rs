//! Authentication API integration tests
//!
//! Register, login, me, and bearer token enforcement.

use std::io;
use std::sync::{Arc, Mutex};

use axum::http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::assert_contains;
use crate::common::{generate_test_token, TestApp};

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::new().await;

    let res = app
        .request(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({ "name": "Ada", "email": "Ada@Example.com", "password": "password123" })),
        )
        .await;

    assert_eq!(res.status, StatusCode::CREATED);
    assert!(res.body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(res.body["user"]["email"], "ada@example.com");
    assert_eq!(res.body["user"]["name"], "Ada");
    assert!(res.body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::new().await;
    let body = json!({ "name": "Ada", "email": "ada@example.com", "password": "password123" });

    let first = app
        .request(Method::POST, "/api/auth/register", None, Some(body.clone()))
        .await;
    assert_eq!(first.status, StatusCode::CREATED);

    let second = app
        .request(Method::POST, "/api/auth/register", None, Some(body))
        .await;
    assert_eq!(second.status, StatusCode::CONFLICT);
    assert_eq!(second.body["status"], 409);
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let app = TestApp::new().await;

    let res = app
        .request(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({ "name": "Ada", "email": "ada@example.com", "password": "short" })),
        )
        .await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_contains!(res.body["error"].as_str().unwrap_or_default(), "password");
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new().await;
    let user = app.user("Grace").await;

    let res = app
        .request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": user.email, "password": user.password })),
        )
        .await;

    assert_eq!(res.status, StatusCode::OK);
    let token = res.body["token"].as_str().unwrap().to_string();

    let me = app.get("/api/auth/me", &token).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["id"], user.id.to_string());
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let app = TestApp::new().await;
    let user = app.user("Grace").await;

    let wrong_password = app
        .request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": user.email, "password": "wrongpassword" })),
        )
        .await;
    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);

    let unknown = app
        .request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": "nobody@example.com", "password": "password123" })),
        )
        .await;
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.body["error"], wrong_password.body["error"]);
}

/// Collects formatted log output written by a scoped subscriber
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_auth_logs_never_contain_request_email() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let app = TestApp::new().await;
    let email = "hopper@example.com";
    let body = json!({ "name": "Grace", "email": email, "password": "password123" });

    let created = app
        .request(Method::POST, "/api/auth/register", None, Some(body.clone()))
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let duplicate = app
        .request(Method::POST, "/api/auth/register", None, Some(body))
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);

    for password in ["password123", "wrongpassword"] {
        app.request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": email, "password": password })),
        )
        .await;
    }
    app.request(
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "stranger@example.com", "password": "password123" })),
    )
    .await;

    let output = logs.text();
    assert_contains!(output, "User registered");
    assert_contains!(output, "User logged in");
    assert!(!output.contains(email), "email leaked into logs:\n{output}");
    assert!(!output.contains("stranger@example.com"), "email leaked into logs:\n{output}");
}

#[tokio::test]
async fn test_get_me_with_valid_token() {
    let app = TestApp::new().await;
    let user = app.user("Linus").await;

    let res = app.get("/api/auth/me", &user.token).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["email"], user.email);
    assert_eq!(res.body["name"], "Linus");
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = TestApp::new().await;

    for uri in ["/api/auth/me", "/api/boards"] {
        let res = app.request(Method::GET, uri, None, None).await;
        assert_eq!(res.status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(res.body["status"], 401);
    }
}

#[tokio::test]
async fn test_rejects_garbage_token() {
    let app = TestApp::new().await;

    let res = app.get("/api/boards", "not-a-jwt").await;

    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_rejects_token_for_deleted_user() {
    let app = TestApp::new().await;
    let token = generate_test_token(uuid::Uuid::new_v4(), "ghost@example.com");

    let res = app.get("/api/boards", &token).await;

    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
}
