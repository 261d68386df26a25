mod common;

use acadewave_db::AccountDirectory;
use acadewave_models::Role;
use axum::http::StatusCode;
use common::{TEST_PASSWORD, spawn_app};
use serde_json::json;

#[tokio::test]
async fn test_get_me_returns_own_account() {
    let app = spawn_app();
    let token = app.login_as("ada", Role::Student).await;

    let (status, body) = app.get("/api/users/me", Some(&token)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "ada");
    assert_eq!(body["role"], "student");
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_update_username_and_password() {
    let app = spawn_app();
    let token = app.login_as("ada", Role::Teacher).await;

    let (status, body) = app
        .patch(
            "/api/users/me",
            json!({ "username": "countess", "password": "analytical1843" }),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["username"], "countess");
    assert_eq!(body["role"], "teacher");

    let (status, _) = app
        .post(
            "/api/auth/login",
            json!({ "identity": "countess", "password": "analytical1843" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .post(
            "/api/auth/login",
            json!({ "identity": "countess", "password": TEST_PASSWORD }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .post(
            "/api/auth/login",
            json!({ "identity": "ada", "password": "analytical1843" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_password_only_keeps_username() {
    let app = spawn_app();
    let token = app.login_as("grace", Role::Student).await;

    let (status, body) = app
        .patch("/api/users/me", json!({ "password": "cobol-1959" }), Some(&token))
        .await;

    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["username"], "grace");

    let (status, _) = app
        .post(
            "/api/auth/login",
            json!({ "identity": "grace@example.com", "password": "cobol-1959" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_empty_update_is_a_no_op() {
    let app = spawn_app();
    let token = app.login_as("alan", Role::Student).await;

    let (status, body) = app.patch("/api/users/me", json!({}), Some(&token)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "alan");
}

#[tokio::test]
async fn test_username_collision_is_conflict() {
    let app = spawn_app();
    app.seed_account("taken", Role::Student, true).await;
    let token = app.login_as("ada", Role::Student).await;

    let (status, body) = app
        .patch(
            "/api/users/me",
            json!({ "username": "taken", "password": "another-password" }),
            Some(&token),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("username"));

    let (status, _) = app
        .post(
            "/api/auth/login",
            json!({ "identity": "ada", "password": TEST_PASSWORD }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "failed rename must not change the password");
}

#[tokio::test]
async fn test_update_rejects_invalid_fields() {
    let app = spawn_app();
    let token = app.login_as("ada", Role::Student).await;

    for body in [
        json!({ "username": "<script>alert(1)</script>" }),
        json!({ "username": "ada@home" }),
        json!({ "username": "ab" }),
        json!({ "password": "short" }),
    ] {
        let (status, response) = app.patch("/api/users/me", body.clone(), Some(&token)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{body}: {response}");
    }

    let (_, me) = app.get("/api/users/me", Some(&token)).await;
    assert_eq!(me["username"], "ada");
}

#[tokio::test]
async fn test_update_requires_bearer_token() {
    let app = spawn_app();
    app.seed_account("ada", Role::Student, true).await;

    let (status, body) = app
        .patch("/api/users/me", json!({ "username": "hijack" }), None)
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Missing authorization header");
    assert!(app.directory.find_by_identity("hijack").await.unwrap().is_none());
}
