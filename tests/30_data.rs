// Runs the services and handlers against Postgres. Each test seeds its own
// rows with unique emails, so the suite can share one database.

mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use serde_json::json;
use uuid::Uuid;

use common::LiveApp;
use school_api::access::Role;
use school_api::database::models::{
    Class, CreateClass, CreateEnrollment, CreateLessonPlan, CreateStudent, CreateTeacher, Student, Teacher,
    UpdateClass, User,
};
use school_api::database::DatabaseError;

async fn seed_teacher(app: &LiveApp) -> Result<(Teacher, User, String)> {
    let (user, token) = app.login_as(Role::Teacher).await?;
    let teacher = app
        .state
        .teachers
        .create(&CreateTeacher {
            user_id: Some(user.id),
            branch_id: None,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: format!("teacher-{}@school.test", Uuid::new_v4().simple()),
            phone: None,
            subject: Some("Mathematics".to_string()),
        })
        .await?;
    Ok((teacher, user, token))
}

async fn seed_student(app: &LiveApp) -> Result<Student> {
    Ok(app
        .state
        .students
        .create(&CreateStudent {
            user_id: None,
            branch_id: None,
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            email: Some(format!("student-{}@school.test", Uuid::new_v4().simple())),
            phone: None,
            date_of_birth: None,
            guardian_name: None,
            guardian_phone: None,
        })
        .await?)
}

async fn seed_class(app: &LiveApp, capacity: Option<i32>, teacher_id: Option<Uuid>) -> Result<Class> {
    Ok(app
        .state
        .classes
        .create(&CreateClass {
            name: "Algebra I".to_string(),
            subject: Some("Mathematics".to_string()),
            teacher_id,
            branch_id: None,
            schedule: Some("Mon 09:00".to_string()),
            capacity,
        })
        .await?)
}

async fn enroll(app: &LiveApp, class: &Class, status: &str) -> Result<Result<(), DatabaseError>> {
    let student = seed_student(app).await?;
    Ok(app
        .state
        .enrollments
        .create(&CreateEnrollment { student_id: student.id, class_id: class.id, status: Some(status.to_string()) })
        .await
        .map(|_| ()))
}

#[tokio::test]
async fn full_class_rejects_another_active_enrollment() -> Result<()> {
    let Some(app) = LiveApp::connect().await? else { return Ok(()) };
    let class = seed_class(&app, Some(2), None).await?;

    enroll(&app, &class, "active").await??;
    enroll(&app, &class, "active").await??;

    match enroll(&app, &class, "active").await? {
        Err(DatabaseError::Conflict(message)) => assert_eq!(message, "Class is full"),
        other => panic!("expected a full class, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn full_class_answers_409_over_http() -> Result<()> {
    let Some(app) = LiveApp::connect().await? else { return Ok(()) };
    let (_, admin_token) = app.login_as(Role::Admin).await?;
    let class = seed_class(&app, Some(1), None).await?;
    enroll(&app, &class, "active").await??;

    let student = seed_student(&app).await?;
    let (status, body) = app
        .send(
            Method::POST,
            "/api/enrollments",
            Some(&admin_token),
            Some(json!({ "student_id": student.id, "class_id": class.id })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Class is full");
    assert_eq!(body["code"], "CONFLICT");
    Ok(())
}

#[tokio::test]
async fn last_seat_can_be_taken() -> Result<()> {
    let Some(app) = LiveApp::connect().await? else { return Ok(()) };
    let class = seed_class(&app, Some(3), None).await?;

    enroll(&app, &class, "active").await??;
    enroll(&app, &class, "active").await??;
    assert!(enroll(&app, &class, "active").await?.is_ok());
    Ok(())
}

#[tokio::test]
async fn dropped_enrollments_free_their_seat() -> Result<()> {
    let Some(app) = LiveApp::connect().await? else { return Ok(()) };
    let class = seed_class(&app, Some(1), None).await?;

    enroll(&app, &class, "dropped").await??;
    enroll(&app, &class, "completed").await??;
    assert!(enroll(&app, &class, "active").await?.is_ok());
    Ok(())
}

#[tokio::test]
async fn inactive_enrollments_skip_the_capacity_check() -> Result<()> {
    let Some(app) = LiveApp::connect().await? else { return Ok(()) };
    let class = seed_class(&app, Some(1), None).await?;
    enroll(&app, &class, "active").await??;

    assert!(enroll(&app, &class, "dropped").await?.is_ok());
    assert!(enroll(&app, &class, "completed").await?.is_ok());
    assert!(matches!(enroll(&app, &class, "active").await?, Err(DatabaseError::Conflict(_))));
    Ok(())
}

#[tokio::test]
async fn uncapped_classes_accept_everyone() -> Result<()> {
    let Some(app) = LiveApp::connect().await? else { return Ok(()) };
    let class = seed_class(&app, None, None).await?;
    for _ in 0..3 {
        enroll(&app, &class, "active").await??;
    }
    Ok(())
}

#[tokio::test]
async fn class_owner_follows_its_teacher_and_updates_are_partial() -> Result<()> {
    let Some(app) = LiveApp::connect().await? else { return Ok(()) };
    let (teacher, user, _) = seed_teacher(&app).await?;
    let class = seed_class(&app, Some(20), Some(teacher.id)).await?;
    assert_eq!(class.owner_user_id, Some(user.id));

    let updated = app
        .state
        .classes
        .update(class.id, &UpdateClass { capacity: Some(25), ..Default::default() })
        .await?;
    assert_eq!(updated.capacity, Some(25));
    assert_eq!(updated.name, "Algebra I");
    assert_eq!(updated.schedule.as_deref(), Some("Mon 09:00"));
    assert_eq!(updated.owner_user_id, Some(user.id));

    let unassigned = seed_class(&app, None, None).await?;
    assert_eq!(unassigned.owner_user_id, None);
    Ok(())
}

#[tokio::test]
async fn lesson_plans_are_managed_only_by_their_teacher() -> Result<()> {
    let Some(app) = LiveApp::connect().await? else { return Ok(()) };
    let (owner, owner_user, owner_token) = seed_teacher(&app).await?;
    let (_, _, other_token) = seed_teacher(&app).await?;

    let plan = app
        .state
        .lesson_plans
        .create(
            owner.id,
            &CreateLessonPlan {
                teacher_id: None,
                class_id: None,
                title: "Fractions".to_string(),
                content: Some("Halves and quarters".to_string()),
                objectives: None,
                lesson_date: None,
            },
        )
        .await?;
    assert_eq!(plan.owner_user_id, Some(owner_user.id));
    let uri = format!("/api/lesson-plans/{}", plan.id);

    let (status, body) = app
        .send(Method::PUT, &uri, Some(&other_token), Some(json!({ "title": "Hijacked" })))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");
    assert_eq!(body["currentRole"], "teacher");

    let (status, _) = app.send(Method::DELETE, &uri, Some(&other_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Another teacher's listing does not include the plan.
    let (status, body) = app.send(Method::GET, "/api/lesson-plans", Some(&other_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].as_array().unwrap().iter().all(|p| p["id"] != json!(plan.id)));

    let (status, body) = app
        .send(Method::PUT, &uri, Some(&owner_token), Some(json!({ "title": "Fractions, part 2" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Fractions, part 2");
    assert_eq!(body["data"]["content"], "Halves and quarters");

    let (status, _) = app.send(Method::DELETE, &uri, Some(&owner_token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(matches!(app.state.lesson_plans.get(plan.id).await, Err(DatabaseError::NotFound(_))));
    Ok(())
}

#[tokio::test]
async fn login_rejects_unknown_emails_and_wrong_passwords_alike() -> Result<()> {
    let Some(app) = LiveApp::connect().await? else { return Ok(()) };
    let email = format!("new-{}@school.test", Uuid::new_v4().simple());

    let (status, body) = app
        .send(
            Method::POST,
            "/auth/register",
            None,
            Some(json!({ "email": email, "password": "long enough", "name": "New Student" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["user"]["role"], "student");

    let (status, body) = app
        .send(Method::POST, "/auth/login", None, Some(json!({ "email": email, "password": "long enough" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["token"].is_string());

    let (wrong_status, wrong_body) = app
        .send(Method::POST, "/auth/login", None, Some(json!({ "email": email, "password": "not the one" })))
        .await;
    let (unknown_status, unknown_body) = app
        .send(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "email": "nobody@school.test", "password": "not the one" })),
        )
        .await;
    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body, unknown_body);
    assert_eq!(unknown_body["error"], "Invalid credentials");
    Ok(())
}
