// handlers/protected/users.rs - /api/users

use axum::extract::State;
use serde::Deserialize;
use uuid::Uuid;

use crate::access::{forbid_self_action, Action, Requirement, Role};
use crate::database::models::User;
use crate::middleware::{authorize, ApiResponse, ApiResult, AppJson, AppPath, CurrentUser};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChangeRoleRequest {
    pub role: Role,
}

/// GET /api/users - route guard: VIEW_USERS
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<User>> {
    Ok(ApiResponse::success(state.users.list().await?))
}

/// GET /api/users/:id
///
/// Anyone may read their own record. Reading someone else's needs
/// VIEW_USERS, and reading another admin or superadmin additionally needs
/// VIEW_ADMIN_DETAILS.
pub async fn get(
    State(state): State<AppState>,
    current: CurrentUser,
    AppPath(id): AppPath<Uuid>,
) -> ApiResult<User> {
    authorize(state.permissions(), &current, &Requirement::OwnerOr { action: Action::ViewUsers, owner: Some(id) })?;

    let user = state.users.get(id).await?;
    if user.id != current.id && user.role().is_administrative() {
        authorize(state.permissions(), &current, &Requirement::Action(Action::ViewAdminDetails))?;
    }

    Ok(ApiResponse::success(user))
}

/// PUT /api/users/:id/role - route guard: CHANGE_USER_ROLE
pub async fn change_role(
    State(state): State<AppState>,
    current: CurrentUser,
    AppPath(id): AppPath<Uuid>,
    AppJson(body): AppJson<ChangeRoleRequest>,
) -> ApiResult<User> {
    forbid_self_action(&current.caller(), id, "change the role of")?;

    let user = state.users.update_role(id, body.role).await?;
    tracing::info!("User {} changed role of {} to {}", current.id, id, body.role);
    Ok(ApiResponse::success(user))
}

/// DELETE /api/users/:id - route guard: DELETE_USERS
pub async fn delete(
    State(state): State<AppState>,
    current: CurrentUser,
    AppPath(id): AppPath<Uuid>,
) -> ApiResult<()> {
    forbid_self_action(&current.caller(), id, "delete")?;

    state.users.delete(id).await?;
    tracing::info!("User {} deleted user {}", current.id, id);
    Ok(ApiResponse::no_content())
}
