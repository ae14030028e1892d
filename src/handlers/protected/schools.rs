// handlers/protected/schools.rs - /api/schools
//
// Reads are guarded by VIEW_SCHOOLS, writes by MANAGE_SCHOOLS.

use axum::extract::State;
use uuid::Uuid;

use crate::database::models::{CreateSchool, School, UpdateSchool};
use crate::handlers::validate;
use crate::middleware::{ApiResponse, ApiResult, AppJson, AppPath};
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<School>> {
    Ok(ApiResponse::success(state.schools.list().await?))
}

pub async fn get(State(state): State<AppState>, AppPath(id): AppPath<Uuid>) -> ApiResult<School> {
    Ok(ApiResponse::success(state.schools.get(id).await?))
}

pub async fn create(State(state): State<AppState>, AppJson(body): AppJson<CreateSchool>) -> ApiResult<School> {
    validate::required("name", &body.name)?;
    validate::optional_email("email", body.email.as_deref())?;

    let school = state.schools.create(&body).await?;
    tracing::info!("Created school {}", school.id);
    Ok(ApiResponse::created(school))
}

pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(body): AppJson<UpdateSchool>,
) -> ApiResult<School> {
    validate::not_blank("name", body.name.as_deref())?;
    validate::optional_email("email", body.email.as_deref())?;

    Ok(ApiResponse::success(state.schools.update(id, &body).await?))
}

pub async fn delete(State(state): State<AppState>, AppPath(id): AppPath<Uuid>) -> ApiResult<()> {
    state.schools.delete(id).await?;
    tracing::info!("Deleted school {}", id);
    Ok(ApiResponse::no_content())
}
