//! Registration, login and bearer-token handling.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{TEST_PASSWORD, TestApp};
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn register_returns_user_without_password() {
    let app = TestApp::spawn();

    let response = app.register("ada@example.com", &["vegan"]).await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["email"], "ada@example.com");
    assert_eq!(response.body["role"], "user");
    assert_eq!(response.body["status"], "active");
    assert_eq!(response.body["preferences"], json!(["vegan"]));
    assert!(response.body.get("password").is_none());
    assert!(response.body.get("password_hash").is_none());
}

#[tokio::test]
async fn duplicate_email_is_rejected_case_insensitively() {
    let app = TestApp::spawn();
    app.register("ada@example.com", &[]).await;

    let response = app.register("ADA@example.com", &[]).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "Email already registered");
}

#[tokio::test]
async fn register_validates_payload() {
    let app = TestApp::spawn();

    let response = app
        .post(
            "/register",
            None,
            json!({
                "first_name": "Ada",
                "last_name": "Lovelace",
                "email": "not-an-email",
                "password": "short",
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn login_issues_bearer_token() {
    let app = TestApp::spawn();
    app.register("ada@example.com", &[]).await;

    let response = app.login("ada@example.com", TEST_PASSWORD).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["token_type"], "bearer");
    assert_eq!(response.body["expires_in"], 3600);
    assert!(response.body["access_token"].as_str().is_some());
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let app = TestApp::spawn();
    app.register("ada@example.com", &[]).await;

    let wrong_password = app.login("ada@example.com", "wrong-password").await;
    let unknown_email = app.login("nobody@example.com", TEST_PASSWORD).await;

    assert_eq!(wrong_password.status, StatusCode::BAD_REQUEST);
    assert_eq!(unknown_email.status, StatusCode::BAD_REQUEST);
    assert_eq!(wrong_password.body, unknown_email.body);
    assert_eq!(wrong_password.body["error"], "Incorrect email or password");
}

#[tokio::test]
async fn me_returns_current_user() {
    let app = TestApp::spawn();
    let (user_id, token) = app.signed_in_user("ada@example.com", &[]).await;

    let response = app.get("/me", Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["id"], user_id);
    assert_eq!(response.body["email"], "ada@example.com");
}

#[tokio::test]
async fn me_requires_token() {
    let app = TestApp::spawn();

    let response = app.get("/me", None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_token_is_rejected() {
    let app = TestApp::spawn();
    let (user_id, _) = app.signed_in_user("ada@example.com", &[]).await;
    let user_id = Uuid::parse_str(&user_id).unwrap();

    let stale = app
        .state
        .jwt
        .generate_access_token_at(user_id, Utc::now() - Duration::minutes(61))
        .unwrap();
    let fresh_enough = app
        .state
        .jwt
        .generate_access_token_at(user_id, Utc::now() - Duration::minutes(59))
        .unwrap();

    assert_eq!(
        app.get("/me", Some(&stale)).await.status,
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(app.get("/me", Some(&fresh_enough)).await.status, StatusCode::OK);
}

#[tokio::test]
async fn tampered_token_is_rejected() {
    let app = TestApp::spawn();
    let (_, token) = app.signed_in_user("ada@example.com", &[]).await;

    let (unsigned, signature) = token.rsplit_once('.').unwrap();
    let replacement = if signature.starts_with('A') { 'B' } else { 'A' };
    let tampered = format!("{}.{}{}", unsigned, replacement, &signature[1..]);

    let response = app.get("/me", Some(&tampered)).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "Could not validate credentials");
}

#[tokio::test]
async fn token_for_unknown_user_is_rejected() {
    let app = TestApp::spawn();
    let token = app.state.jwt.generate_access_token(Uuid::new_v4()).unwrap();

    let response = app.get("/me", Some(&token)).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_is_acknowledged() {
    let app = TestApp::spawn();

    let response = app.post("/logout", None, json!({})).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["message"].as_str().unwrap().contains("logged out"));
}

#[tokio::test]
async fn health_and_metrics_sit_outside_prefix() {
    let app = TestApp::spawn();

    let health = app.send(common::request("GET", "/health", None, None)).await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["status"], "healthy");
    assert_eq!(health.body["service"], "recipe-service-test");

    let metrics = app.send(common::request("GET", "/metrics", None, None)).await;
    assert_eq!(metrics.status, StatusCode::OK);
}

#[tokio::test]
async fn openapi_document_follows_configured_prefix() {
    let mut config = common::test_config();
    config.api_prefix = "/api/lutome".into();
    let app = TestApp::with_config(config);

    let doc = app
        .send(common::request("GET", "/.well-known/openapi.json", None, None))
        .await;
    assert_eq!(doc.status, StatusCode::OK);

    let paths = doc.body["paths"].as_object().unwrap();
    assert!(paths.contains_key("/api/lutome/recipes/ai_dishes"));
    assert!(paths.contains_key("/api/lutome/login"));
    assert!(paths.contains_key("/health"));
    assert!(!paths.keys().any(|p| p.starts_with("/api/v1")));

    let login = app.login("nobody@example.com", TEST_PASSWORD).await;
    assert_eq!(login.status, StatusCode::BAD_REQUEST);
}
