// handlers/protected/branches.rs - /api/branches
//
// Reads are guarded by VIEW_BRANCHES, writes by MANAGE_BRANCHES.

use axum::extract::State;
use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::{Branch, CreateBranch, UpdateBranch};
use crate::handlers::validate;
use crate::middleware::{ApiResponse, ApiResult, AppJson, AppPath, AppQuery};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct BranchQuery {
    pub school_id: Option<Uuid>,
}

pub async fn list(State(state): State<AppState>, AppQuery(query): AppQuery<BranchQuery>) -> ApiResult<Vec<Branch>> {
    Ok(ApiResponse::success(state.branches.list(query.school_id).await?))
}

pub async fn get(State(state): State<AppState>, AppPath(id): AppPath<Uuid>) -> ApiResult<Branch> {
    Ok(ApiResponse::success(state.branches.get(id).await?))
}

pub async fn create(State(state): State<AppState>, AppJson(body): AppJson<CreateBranch>) -> ApiResult<Branch> {
    validate::required("name", &body.name)?;

    let branch = state.branches.create(&body).await?;
    tracing::info!("Created branch {} for school {}", branch.id, branch.school_id);
    Ok(ApiResponse::created(branch))
}

pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(body): AppJson<UpdateBranch>,
) -> ApiResult<Branch> {
    validate::not_blank("name", body.name.as_deref())?;
    Ok(ApiResponse::success(state.branches.update(id, &body).await?))
}

pub async fn delete(State(state): State<AppState>, AppPath(id): AppPath<Uuid>) -> ApiResult<()> {
    state.branches.delete(id).await?;
    tracing::info!("Deleted branch {}", id);
    Ok(ApiResponse::no_content())
}
