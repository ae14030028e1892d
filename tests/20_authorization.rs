mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::TestApp;
use school_api::access::Role;

#[tokio::test]
async fn student_on_faculty_route_gets_role_details() {
    let app = TestApp::new();
    let (_, token) = app.login_as(Role::Student);

    let (status, body) = app.get("/api/students", Some(&token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Access forbidden");
    assert_eq!(body["code"], "FORBIDDEN");
    assert_eq!(body["currentRole"], "student");
    assert_eq!(body["requiredRoles"], json!(["superadmin", "admin", "teacher"]));
}

#[tokio::test]
async fn role_comes_from_the_stored_user_not_the_token() {
    let app = TestApp::new();
    let student = common::user(Role::Student);
    app.users.insert(student.clone());
    // Token claims admin; the stored row says student.
    let token = app.tokens.issue(student.id, &student.email, Role::Admin).unwrap().token;

    let (status, body) = app.get("/api/users", Some(&token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["currentRole"], "student");
}

#[tokio::test]
async fn only_superadmins_delete_users() {
    let app = TestApp::new();
    let (_, token) = app.login_as(Role::Admin);
    let target = common::user(Role::Student);

    let (status, body) = app.send(Method::DELETE, &format!("/api/users/{}", target.id), Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["requiredRoles"], json!(["superadmin"]));
    assert_eq!(body["currentRole"], "admin");
}

#[tokio::test]
async fn superadmin_cannot_delete_self() {
    let app = TestApp::new();
    let (me, token) = app.login_as(Role::Superadmin);

    let (status, body) = app.send(Method::DELETE, &format!("/api/users/{}", me.id), Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "You cannot delete your own account");
}

#[tokio::test]
async fn superadmin_cannot_change_own_role() {
    let app = TestApp::new();
    let (me, token) = app.login_as(Role::Superadmin);

    let (status, body) = app
        .send(
            Method::PUT,
            &format!("/api/users/{}/role", me.id),
            Some(&token),
            Some(json!({ "role": "admin" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "You cannot change the role of your own account");
}

#[tokio::test]
async fn teachers_cannot_manage_schools() {
    let app = TestApp::new();
    let (_, token) = app.login_as(Role::Teacher);

    let (status, body) = app
        .send(Method::POST, "/api/schools", Some(&token), Some(json!({ "name": "North High" })))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["requiredRoles"], json!(["superadmin"]));
}

#[tokio::test]
async fn students_cannot_list_every_message() {
    let app = TestApp::new();
    let (_, token) = app.login_as(Role::Student);

    let (status, body) = app.get("/api/messages?all=true", Some(&token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["requiredRoles"], json!(["superadmin", "admin"]));
}

#[tokio::test]
async fn students_cannot_create_enrollments() {
    let app = TestApp::new();
    let (_, token) = app.login_as(Role::Student);

    let body = json!({
        "student_id": uuid::Uuid::new_v4(),
        "class_id": uuid::Uuid::new_v4()
    });
    let (status, _) = app.send(Method::POST, "/api/enrollments", Some(&token), Some(body)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn reading_own_user_passes_the_gates() {
    let app = TestApp::new();
    let (me, token) = app.login_as(Role::Student);

    // Both gates pass; the unreachable database answers.
    let (status, body) = app.get(&format!("/api/users/{}", me.id), Some(&token)).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "SERVICE_UNAVAILABLE");
}

#[tokio::test]
async fn reading_another_user_needs_view_users() {
    let app = TestApp::new();
    let (_, token) = app.login_as(Role::Teacher);
    let other = common::user(Role::Student);

    let (status, body) = app.get(&format!("/api/users/{}", other.id), Some(&token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["requiredRoles"], json!(["superadmin", "admin"]));
    assert_eq!(body["currentRole"], "teacher");
}

#[tokio::test]
async fn malformed_ids_are_bad_requests() {
    let app = TestApp::new();
    let (_, token) = app.login_as(Role::Superadmin);

    let (status, body) = app.get("/api/users/not-a-uuid", Some(&token)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}
