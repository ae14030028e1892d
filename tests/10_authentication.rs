mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};

use common::TestApp;
use school_api::access::Role;

#[tokio::test]
async fn missing_header_requires_authentication() {
    let app = TestApp::new();
    let (status, body) = app.get("/api/students", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Authentication required");
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn non_bearer_header_requires_authentication() {
    let app = TestApp::new();
    let (status, body) = app.get("/api/auth/me", Some("")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Authentication required");
}

#[tokio::test]
async fn garbled_token_is_invalid() {
    let app = TestApp::new();
    let (status, body) = app.get("/api/auth/me", Some("not.a.jwt")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid token");
}

#[tokio::test]
async fn token_from_another_secret_is_invalid() {
    let app = TestApp::new();
    let (user, _) = app.login_as(Role::Admin);
    let foreign = school_api::auth::TokenService::new("some-other-secret", Duration::hours(168));
    let token = foreign.issue(user.id, &user.email, Role::Admin).unwrap().token;

    let (status, body) = app.get("/api/auth/me", Some(&token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid token");
}

#[tokio::test]
async fn expired_token_is_rejected_before_authorization() {
    let app = TestApp::new();
    // A student on a faculty-only route: expiry must win over the 403.
    let (user, _) = app.login_as(Role::Student);
    let token = app.token_at(&user, Utc::now() - Duration::days(8));

    let (status, body) = app.get("/api/students", Some(&token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Token expired");
}

#[tokio::test]
async fn six_day_old_token_is_accepted() {
    let app = TestApp::new();
    let (user, _) = app.login_as(Role::Teacher);
    let token = app.token_at(&user, Utc::now() - Duration::days(6));

    let (status, body) = app.get("/api/auth/me", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], user.id.to_string());
}

#[tokio::test]
async fn deleted_user_is_not_found() {
    let app = TestApp::new();
    let (user, token) = app.login_as(Role::Admin);
    app.users.remove(user.id);

    let (status, body) = app.get("/api/auth/me", Some(&token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "User not found");
}

#[tokio::test]
async fn me_returns_stored_identity_without_password_hash() {
    let app = TestApp::new();
    let (user, token) = app.login_as(Role::Student);

    let (status, body) = app.get("/api/auth/me", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["email"], user.email);
    assert_eq!(body["data"]["role"], "student");
    assert!(body["data"].get("password_hash").is_none());
}
