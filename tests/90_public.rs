mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::TestApp;

#[tokio::test]
async fn root_describes_the_service() {
    let app = TestApp::new();
    let (status, body) = app.get("/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["name"], "School API");
}

#[tokio::test]
async fn health_reports_unreachable_database() {
    let app = TestApp::new();
    let (status, body) = app.get("/health", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["success"], false);
    assert_eq!(body["data"]["status"], "degraded");
}

#[tokio::test]
async fn register_validates_email_before_touching_the_database() {
    let app = TestApp::new();
    let body = json!({ "email": "not-an-email", "password": "long enough", "name": "Ada" });

    let (status, body) = app.send(Method::POST, "/auth/register", None, Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["field_errors"]["email"], "Invalid email format");
}

#[tokio::test]
async fn register_rejects_short_passwords() {
    let app = TestApp::new();
    let body = json!({ "email": "ada@school.test", "password": "short", "name": "Ada" });

    let (status, body) = app.send(Method::POST, "/auth/register", None, Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["field_errors"]["password"].is_string());
}

#[tokio::test]
async fn login_with_missing_fields_is_invalid_json() {
    let app = TestApp::new();
    let (status, body) = app
        .send(Method::POST, "/auth/login", None, Some(json!({ "email": "ada@school.test" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_JSON");
}
