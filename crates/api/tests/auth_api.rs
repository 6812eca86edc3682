//! HTTP-level tests for registration, login, and write protection.

mod common;

use axum::http::StatusCode;
use common::{body_json, post_json, post_json_auth};
use serde_json::json;

async fn register(app: axum::Router, username: &str, password: &str) -> axum::response::Response {
    let body = json!({
        "username": username,
        "password": password,
        "email": format!("{username}@example.com"),
    });
    post_json(app, "/api/v1/auth/register", body).await
}

// ---------------------------------------------------------------------------
// Register
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_register_returns_new_id() {
    let app = common::build_test_app();
    let response = register(app, "mickey", "cheese-please").await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["data"]["id"].is_string());
}

#[tokio::test]
async fn test_register_rejects_short_username() {
    let app = common::build_test_app();
    let response = register(app, "goofy", "cheese-please").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let app = common::build_test_app();
    let response = register(app, "minnie", "12345").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_rejects_invalid_email() {
    let app = common::build_test_app();
    let body = json!({ "username": "donald", "password": "quack-quack", "email": "not-an-email" });
    let response = post_json(app, "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_register_duplicate_username_conflicts() {
    let app = common::build_test_app();
    let first = register(app.clone(), "mickey", "cheese-please").await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = register(app, "mickey", "another-pass").await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(second).await["code"], "CONFLICT");
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_login_token_authorizes_writes() {
    let app = common::build_test_app();
    register(app.clone(), "mickey", "cheese-please").await;

    let body = json!({ "username": "mickey", "password": "cheese-please" });
    let response = post_json(app.clone(), "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let token = json["data"]["token"].as_str().expect("token must be a string");
    assert_eq!(json["data"]["expires_in"], 3600);

    let character = json!({ "name": "Pluto", "story": "A loyal dog" });
    let response = post_json_auth(app, "/api/v1/characters", character, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = common::build_test_app();
    register(app.clone(), "mickey", "cheese-please").await;

    let body = json!({ "username": "mickey", "password": "wrong-password" });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_login_unknown_user() {
    let app = common::build_test_app();
    let body = json!({ "username": "nobody-here", "password": "whatever" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_empty_username_is_bad_request() {
    let app = common::build_test_app();
    let body = json!({ "username": "", "password": "whatever" });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}
