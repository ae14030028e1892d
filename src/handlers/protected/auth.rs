// handlers/protected/auth.rs - GET /api/auth/me, PUT /api/auth/password

use axum::extract::State;
use serde::Deserialize;

use crate::auth::password::{hash_password_async, verify_password_async};
use crate::database::models::User;
use crate::error::ApiError;
use crate::handlers::validate;
use crate::middleware::{ApiResponse, ApiResult, AppJson, CurrentUser};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// GET /api/auth/me - the caller as currently stored
pub async fn me(current: CurrentUser) -> ApiResult<User> {
    Ok(ApiResponse::success(current.user))
}

/// PUT /api/auth/password
pub async fn change_password(
    State(state): State<AppState>,
    current: CurrentUser,
    AppJson(body): AppJson<ChangePasswordRequest>,
) -> ApiResult<()> {
    validate::password("new_password", &body.new_password)?;

    if !verify_password_async(body.current_password, current.user.password_hash.clone()).await? {
        return Err(ApiError::field_error("current_password", "Current password is incorrect"));
    }

    let password_hash = hash_password_async(body.new_password, state.config.security.bcrypt_cost).await?;
    state.users.update_password(current.id, &password_hash).await?;

    tracing::info!("User {} changed their password", current.id);
    Ok(ApiResponse::no_content())
}
