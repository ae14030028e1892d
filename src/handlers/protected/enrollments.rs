// handlers/protected/enrollments.rs - /api/enrollments
//
// Reads are guarded by VIEW_ENROLLMENTS; create and delete by their own
// actions. There is no update: a student withdraws by deleting the row.

use axum::extract::State;
use uuid::Uuid;

use crate::database::models::{CreateEnrollment, Enrollment, EnrollmentFilter};
use crate::handlers::validate;
use crate::middleware::{ApiResponse, ApiResult, AppJson, AppPath, AppQuery};
use crate::state::AppState;

pub async fn list(
    State(state): State<AppState>,
    AppQuery(filter): AppQuery<EnrollmentFilter>,
) -> ApiResult<Vec<Enrollment>> {
    Ok(ApiResponse::success(state.enrollments.list(filter).await?))
}

pub async fn get(State(state): State<AppState>, AppPath(id): AppPath<Uuid>) -> ApiResult<Enrollment> {
    Ok(ApiResponse::success(state.enrollments.get(id).await?))
}

/// Full classes answer 409 "Class is full"; a repeated enrollment answers
/// 409 through the unique constraint.
pub async fn create(
    State(state): State<AppState>,
    AppJson(body): AppJson<CreateEnrollment>,
) -> ApiResult<Enrollment> {
    validate::enrollment_status(body.status.as_deref())?;

    let enrollment = state.enrollments.create(&body).await?;
    tracing::info!("Enrolled student {} in class {}", enrollment.student_id, enrollment.class_id);
    Ok(ApiResponse::created(enrollment))
}

pub async fn delete(State(state): State<AppState>, AppPath(id): AppPath<Uuid>) -> ApiResult<()> {
    state.enrollments.delete(id).await?;
    tracing::info!("Deleted enrollment {}", id);
    Ok(ApiResponse::no_content())
}
