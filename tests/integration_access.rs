mod common;

use acadewave_auth::{TokenClaims, TokenCodec, TokenPurpose};
use acadewave_core::Clock;
use acadewave_models::{AccountId, Role};
use axum::http::StatusCode;
use chrono::Duration;
use common::spawn_app;

const ROUTES: [&str; 3] = [
    "/api/admin/dashboard",
    "/api/teacher/dashboard",
    "/api/student/dashboard",
];

#[tokio::test]
async fn test_role_matrix() {
    let app = spawn_app();
    let admin = app.login_as("root", Role::Admin).await;
    let teacher = app.login_as("mrs_t", Role::Teacher).await;
    let student = app.login_as("kid", Role::Student).await;

    let expected = [
        (&admin, [StatusCode::OK, StatusCode::OK, StatusCode::OK]),
        (
            &teacher,
            [StatusCode::FORBIDDEN, StatusCode::OK, StatusCode::OK],
        ),
        (
            &student,
            [StatusCode::FORBIDDEN, StatusCode::FORBIDDEN, StatusCode::OK],
        ),
    ];

    for (token, statuses) in expected {
        for (route, status) in ROUTES.iter().zip(statuses) {
            let (actual, body) = app.get(route, Some(token)).await;
            assert_eq!(actual, status, "{route}: {body}");
        }
    }
}

#[tokio::test]
async fn test_dashboard_returns_account() {
    let app = spawn_app();
    let admin = app.login_as("root", Role::Admin).await;

    let (status, body) = app.get("/api/admin/dashboard", Some(&admin)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["account"]["role"], "admin");
    assert!(body["message"].as_str().unwrap().contains("root"));
}

#[tokio::test]
async fn test_forbidden_names_required_roles() {
    let app = spawn_app();
    let student = app.login_as("kid", Role::Student).await;

    let (status, body) = app.get("/api/teacher/dashboard", Some(&student)).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Access denied. Required roles: admin, teacher");
}

#[tokio::test]
async fn test_missing_header_is_unauthorized() {
    let app = spawn_app();

    for route in ROUTES.iter().chain(["/api/users/me"].iter()) {
        let (status, body) = app.get(route, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{route}");
        assert_eq!(body["error"], "Missing authorization header");
    }
}

#[tokio::test]
async fn test_bad_tokens_are_indistinguishable() {
    let app = spawn_app();
    let account = app.seed_account("eve", Role::Admin, true).await;

    let now = app.clock.now().timestamp();
    let claims = TokenClaims {
        sub: account.id,
        purpose: TokenPurpose::Access,
        iat: now,
        exp: now + 3600,
    };
    let wrong_key = TokenCodec::new(b"some-other-secret").encode(&claims).unwrap();

    let (malformed_status, malformed_body) =
        app.get("/api/student/dashboard", Some("not.a.token")).await;
    let (wrong_key_status, wrong_key_body) =
        app.get("/api/student/dashboard", Some(&wrong_key)).await;

    assert_eq!(malformed_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_key_status, StatusCode::UNAUTHORIZED);
    assert_eq!(malformed_body, wrong_key_body);
    assert_eq!(malformed_body["error"], "Invalid token");
}

#[tokio::test]
async fn test_lifecycle_tokens_are_not_access_tokens() {
    let app = spawn_app();
    let account = app.seed_account("mallory", Role::Admin, true).await;

    for purpose in [TokenPurpose::EmailVerification, TokenPurpose::PasswordReset] {
        let token = app
            .state
            .auth
            .tokens()
            .issue_token(account.id, purpose)
            .unwrap();

        let (status, body) = app.get("/api/admin/dashboard", Some(&token)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Invalid token");
    }
}

#[tokio::test]
async fn test_access_token_expires_after_an_hour() {
    let app = spawn_app();
    let token = app.login_as("bob", Role::Teacher).await;

    app.clock.advance(Duration::minutes(60));
    let (status, _) = app.get("/api/teacher/dashboard", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);

    app.clock.advance(Duration::seconds(1));
    let (status, body) = app.get("/api/teacher/dashboard", Some(&token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Token has expired");
}

#[tokio::test]
async fn test_token_for_unknown_account() {
    let app = spawn_app();
    let token = app
        .state
        .auth
        .tokens()
        .issue_token(AccountId::new(), TokenPurpose::Access)
        .unwrap();

    let (status, body) = app.get("/api/users/me", Some(&token)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid token");
}

#[tokio::test]
async fn test_deactivated_account_loses_access() {
    let app = spawn_app();
    let account = app.seed_account("dormant", Role::Admin, false).await;
    let token = app
        .state
        .auth
        .tokens()
        .issue_token(account.id, TokenPurpose::Access)
        .unwrap();

    for route in ROUTES.iter().chain(["/api/users/me"].iter()) {
        let (status, body) = app.get(route, Some(&token)).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{route}");
        assert_eq!(body["error"], "Account is not active");
    }
}
