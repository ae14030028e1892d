// handlers/protected/lesson_plans.rs - /api/lesson-plans
//
// Teachers see and manage only their own plans. Admins and superadmins
// see all of them and must name the teacher when creating one.

use axum::extract::State;
use serde::Deserialize;
use uuid::Uuid;

use super::teachers::linked_teacher_id;
use crate::access::{Action, Requirement};
use crate::database::models::{CreateLessonPlan, LessonPlan, UpdateLessonPlan};
use crate::error::ApiError;
use crate::handlers::validate;
use crate::middleware::{authorize, ApiResponse, ApiResult, AppJson, AppPath, AppQuery, CurrentUser};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct LessonPlanQuery {
    pub class_id: Option<Uuid>,
}

/// GET /api/lesson-plans - route guard: VIEW_LESSON_PLANS
pub async fn list(
    State(state): State<AppState>,
    current: CurrentUser,
    AppQuery(query): AppQuery<LessonPlanQuery>,
) -> ApiResult<Vec<LessonPlan>> {
    let owner = if current.role.is_administrative() { None } else { Some(current.id) };
    Ok(ApiResponse::success(state.lesson_plans.list(owner, query.class_id).await?))
}

/// GET /api/lesson-plans/:id - route guard: VIEW_LESSON_PLANS, then ownership
pub async fn get(
    State(state): State<AppState>,
    current: CurrentUser,
    AppPath(id): AppPath<Uuid>,
) -> ApiResult<LessonPlan> {
    let plan = state.lesson_plans.get(id).await?;
    authorize(
        state.permissions(),
        &current,
        &Requirement::OwnedResource { action: Action::ViewLessonPlans, owner: plan.owner_user_id },
    )?;
    Ok(ApiResponse::success(plan))
}

/// POST /api/lesson-plans - route guard: CREATE_LESSON_PLANS
pub async fn create(
    State(state): State<AppState>,
    current: CurrentUser,
    AppJson(body): AppJson<CreateLessonPlan>,
) -> ApiResult<LessonPlan> {
    validate::required("title", &body.title)?;

    let teacher_id = if current.role.is_administrative() {
        body.teacher_id
            .ok_or_else(|| ApiError::field_error("teacher_id", "teacher_id is required"))?
    } else {
        let own = linked_teacher_id(&state, &current).await?;
        if body.teacher_id.is_some_and(|requested| requested != own) {
            return Err(ApiError::forbidden("Teachers can only create their own lesson plans"));
        }
        own
    };

    let plan = state.lesson_plans.create(teacher_id, &body).await?;
    tracing::info!("User {} created lesson plan {}", current.id, plan.id);
    Ok(ApiResponse::created(plan))
}

/// PUT /api/lesson-plans/:id - route guard: UPDATE_LESSON_PLANS, then ownership
pub async fn update(
    State(state): State<AppState>,
    current: CurrentUser,
    AppPath(id): AppPath<Uuid>,
    AppJson(body): AppJson<UpdateLessonPlan>,
) -> ApiResult<LessonPlan> {
    validate::not_blank("title", body.title.as_deref())?;

    let plan = state.lesson_plans.get(id).await?;
    authorize(
        state.permissions(),
        &current,
        &Requirement::OwnedResource { action: Action::UpdateLessonPlans, owner: plan.owner_user_id },
    )?;

    Ok(ApiResponse::success(state.lesson_plans.update(id, &body).await?))
}

/// DELETE /api/lesson-plans/:id - route guard: DELETE_LESSON_PLANS, then ownership
pub async fn delete(
    State(state): State<AppState>,
    current: CurrentUser,
    AppPath(id): AppPath<Uuid>,
) -> ApiResult<()> {
    let plan = state.lesson_plans.get(id).await?;
    authorize(
        state.permissions(),
        &current,
        &Requirement::OwnedResource { action: Action::DeleteLessonPlans, owner: plan.owner_user_id },
    )?;

    state.lesson_plans.delete(id).await?;
    tracing::info!("User {} deleted lesson plan {}", current.id, id);
    Ok(ApiResponse::no_content())
}
