// handlers/protected/teachers.rs - /api/teachers

use axum::extract::State;
use serde::Deserialize;
use uuid::Uuid;

use crate::access::{Action, Requirement};
use crate::database::models::{CreateTeacher, Teacher, UpdateTeacher};
use crate::error::ApiError;
use crate::handlers::validate;
use crate::middleware::{authorize, ApiResponse, ApiResult, AppJson, AppPath, AppQuery, CurrentUser};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct TeacherQuery {
    pub branch_id: Option<Uuid>,
}

/// GET /api/teachers - route guard: VIEW_TEACHERS
pub async fn list(State(state): State<AppState>, AppQuery(query): AppQuery<TeacherQuery>) -> ApiResult<Vec<Teacher>> {
    Ok(ApiResponse::success(state.teachers.list(query.branch_id).await?))
}

/// GET /api/teachers/:id - the linked user, or VIEW_TEACHERS
pub async fn get(
    State(state): State<AppState>,
    current: CurrentUser,
    AppPath(id): AppPath<Uuid>,
) -> ApiResult<Teacher> {
    let teacher = state.teachers.get(id).await?;
    authorize(
        state.permissions(),
        &current,
        &Requirement::OwnerOr { action: Action::ViewTeachers, owner: teacher.user_id },
    )?;
    Ok(ApiResponse::success(teacher))
}

/// POST /api/teachers - route guard: CREATE_TEACHERS
pub async fn create(State(state): State<AppState>, AppJson(body): AppJson<CreateTeacher>) -> ApiResult<Teacher> {
    validate::required("first_name", &body.first_name)?;
    validate::required("last_name", &body.last_name)?;
    validate::email("email", &body.email)?;

    let teacher = state.teachers.create(&body).await?;
    tracing::info!("Created teacher {}", teacher.id);
    Ok(ApiResponse::created(teacher))
}

/// PUT /api/teachers/:id - route guard: UPDATE_TEACHERS
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(body): AppJson<UpdateTeacher>,
) -> ApiResult<Teacher> {
    validate::not_blank("first_name", body.first_name.as_deref())?;
    validate::not_blank("last_name", body.last_name.as_deref())?;
    validate::optional_email("email", body.email.as_deref())?;

    Ok(ApiResponse::success(state.teachers.update(id, &body).await?))
}

/// DELETE /api/teachers/:id - route guard: DELETE_TEACHERS
pub async fn delete(State(state): State<AppState>, AppPath(id): AppPath<Uuid>) -> ApiResult<()> {
    state.teachers.delete(id).await?;
    tracing::info!("Deleted teacher {}", id);
    Ok(ApiResponse::no_content())
}

/// Teacher profile id of the caller. Teachers acting on classes and lesson
/// plans must have a linked profile.
pub(crate) async fn linked_teacher_id(state: &AppState, current: &CurrentUser) -> Result<Uuid, ApiError> {
    state
        .teachers
        .find_by_user(current.id)
        .await?
        .map(|teacher| teacher.id)
        .ok_or_else(|| ApiError::forbidden("No teacher profile is linked to this account"))
}
