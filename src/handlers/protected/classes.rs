// handlers/protected/classes.rs - /api/classes
//
// Teachers may create classes for themselves and change or remove only
// the classes they teach; admins and superadmins manage any class.

use axum::extract::State;
use serde::Deserialize;
use uuid::Uuid;

use super::teachers::linked_teacher_id;
use crate::access::{Action, Requirement, Role};
use crate::database::models::{Class, CreateClass, Student, UpdateClass};
use crate::error::ApiError;
use crate::handlers::validate;
use crate::middleware::{authorize, ApiResponse, ApiResult, AppJson, AppPath, AppQuery, CurrentUser};
use crate::services::ClassFilter;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ClassQuery {
    pub teacher_id: Option<Uuid>,
    pub branch_id: Option<Uuid>,
}

/// GET /api/classes - route guard: VIEW_CLASSES
pub async fn list(State(state): State<AppState>, AppQuery(query): AppQuery<ClassQuery>) -> ApiResult<Vec<Class>> {
    let filter = ClassFilter { teacher_id: query.teacher_id, branch_id: query.branch_id };
    Ok(ApiResponse::success(state.classes.list(filter).await?))
}

/// GET /api/classes/:id - route guard: VIEW_CLASSES
pub async fn get(State(state): State<AppState>, AppPath(id): AppPath<Uuid>) -> ApiResult<Class> {
    Ok(ApiResponse::success(state.classes.get(id).await?))
}

/// GET /api/classes/:id/students - route guard: VIEW_ENROLLMENTS
pub async fn students(State(state): State<AppState>, AppPath(id): AppPath<Uuid>) -> ApiResult<Vec<Student>> {
    let class = state.classes.get(id).await?;
    Ok(ApiResponse::success(state.students.list_for_class(class.id).await?))
}

/// POST /api/classes - route guard: CREATE_CLASSES
pub async fn create(
    State(state): State<AppState>,
    current: CurrentUser,
    AppJson(mut body): AppJson<CreateClass>,
) -> ApiResult<Class> {
    validate::required("name", &body.name)?;
    validate::capacity(body.capacity)?;

    if current.role == Role::Teacher {
        let own = linked_teacher_id(&state, &current).await?;
        if body.teacher_id.is_some_and(|requested| requested != own) {
            return Err(ApiError::forbidden("Teachers can only create their own classes"));
        }
        body.teacher_id = Some(own);
    }

    let class = state.classes.create(&body).await?;
    tracing::info!("User {} created class {}", current.id, class.id);
    Ok(ApiResponse::created(class))
}

/// PUT /api/classes/:id - route guard: UPDATE_CLASSES, then ownership
pub async fn update(
    State(state): State<AppState>,
    current: CurrentUser,
    AppPath(id): AppPath<Uuid>,
    AppJson(body): AppJson<UpdateClass>,
) -> ApiResult<Class> {
    validate::not_blank("name", body.name.as_deref())?;
    validate::capacity(body.capacity)?;

    let class = state.classes.get(id).await?;
    authorize(
        state.permissions(),
        &current,
        &Requirement::OwnedResource { action: Action::UpdateClasses, owner: class.owner_user_id },
    )?;

    if !current.role.is_administrative() && body.teacher_id.is_some_and(|requested| Some(requested) != class.teacher_id) {
        return Err(ApiError::forbidden("Teachers cannot reassign classes"));
    }

    Ok(ApiResponse::success(state.classes.update(id, &body).await?))
}

/// DELETE /api/classes/:id - route guard: DELETE_CLASSES, then ownership
pub async fn delete(
    State(state): State<AppState>,
    current: CurrentUser,
    AppPath(id): AppPath<Uuid>,
) -> ApiResult<()> {
    let class = state.classes.get(id).await?;
    authorize(
        state.permissions(),
        &current,
        &Requirement::OwnedResource { action: Action::DeleteClasses, owner: class.owner_user_id },
    )?;

    state.classes.delete(id).await?;
    tracing::info!("User {} deleted class {}", current.id, id);
    Ok(ApiResponse::no_content())
}
