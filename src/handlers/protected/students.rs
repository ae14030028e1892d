// handlers/protected/students.rs - /api/students

use axum::extract::State;
use serde::Deserialize;
use uuid::Uuid;

use crate::access::{Action, Requirement};
use crate::database::models::{CreateStudent, Student, UpdateStudent};
use crate::handlers::validate;
use crate::middleware::{authorize, ApiResponse, ApiResult, AppJson, AppPath, AppQuery, CurrentUser};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct StudentQuery {
    pub branch_id: Option<Uuid>,
}

/// GET /api/students - route guard: VIEW_STUDENTS
pub async fn list(State(state): State<AppState>, AppQuery(query): AppQuery<StudentQuery>) -> ApiResult<Vec<Student>> {
    Ok(ApiResponse::success(state.students.list(query.branch_id).await?))
}

/// GET /api/students/:id - the linked user, or VIEW_STUDENTS
pub async fn get(
    State(state): State<AppState>,
    current: CurrentUser,
    AppPath(id): AppPath<Uuid>,
) -> ApiResult<Student> {
    let student = state.students.get(id).await?;
    authorize(
        state.permissions(),
        &current,
        &Requirement::OwnerOr { action: Action::ViewStudents, owner: student.user_id },
    )?;
    Ok(ApiResponse::success(student))
}

/// POST /api/students - route guard: CREATE_STUDENTS
pub async fn create(State(state): State<AppState>, AppJson(body): AppJson<CreateStudent>) -> ApiResult<Student> {
    validate::required("first_name", &body.first_name)?;
    validate::required("last_name", &body.last_name)?;
    validate::optional_email("email", body.email.as_deref())?;

    let student = state.students.create(&body).await?;
    tracing::info!("Created student {}", student.id);
    Ok(ApiResponse::created(student))
}

/// PUT /api/students/:id - route guard: UPDATE_STUDENTS
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(body): AppJson<UpdateStudent>,
) -> ApiResult<Student> {
    validate::not_blank("first_name", body.first_name.as_deref())?;
    validate::not_blank("last_name", body.last_name.as_deref())?;
    validate::optional_email("email", body.email.as_deref())?;

    Ok(ApiResponse::success(state.students.update(id, &body).await?))
}

/// DELETE /api/students/:id - route guard: DELETE_STUDENTS
pub async fn delete(State(state): State<AppState>, AppPath(id): AppPath<Uuid>) -> ApiResult<()> {
    state.students.delete(id).await?;
    tracing::info!("Deleted student {}", id);
    Ok(ApiResponse::no_content())
}
