// handlers/public/auth.rs - POST /auth/register, POST /auth/login

use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::access::Role;
use crate::auth::password::{hash_password_async, verify_dummy_password_async, verify_password_async};
use crate::auth::IssuedToken;
use crate::database::models::{NewUser, User};
use crate::database::DatabaseError;
use crate::error::ApiError;
use crate::handlers::validate;
use crate::middleware::{ApiResponse, ApiResult, AppJson};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    #[serde(flatten)]
    pub token: IssuedToken,
    pub user: User,
}

/// POST /auth/register - self-service signup. Always creates a student;
/// elevated roles are granted by a superadmin afterwards.
pub async fn register(
    State(state): State<AppState>,
    AppJson(body): AppJson<RegisterRequest>,
) -> ApiResult<AuthResponse> {
    validate::email("email", &body.email)?;
    validate::password("password", &body.password)?;
    validate::required("name", &body.name)?;

    let password_hash = hash_password_async(body.password, state.config.security.bcrypt_cost).await?;

    let user = state
        .users
        .create(&NewUser {
            email: body.email,
            password_hash,
            name: body.name.trim().to_string(),
            role: Role::Student,
            phone: body.phone,
        })
        .await
        .map_err(|err| match err {
            DatabaseError::UniqueViolation(_) => ApiError::conflict("Email already registered"),
            other => other.into(),
        })?;

    tracing::info!("Registered user {}", user.id);
    let token = state.auth.tokens.issue(user.id, &user.email, user.role())?;
    Ok(ApiResponse::created(AuthResponse { token, user }))
}

/// POST /auth/login - exchange credentials for a session token.
pub async fn login(State(state): State<AppState>, AppJson(body): AppJson<LoginRequest>) -> ApiResult<AuthResponse> {
    let invalid = || ApiError::unauthorized("Invalid credentials");

    let Some(user) = state.users.find_by_email(&body.email).await? else {
        verify_dummy_password_async(body.password, state.config.security.bcrypt_cost).await?;
        return Err(invalid());
    };
    if !verify_password_async(body.password, user.password_hash.clone()).await? {
        tracing::info!("Failed login for user {}", user.id);
        return Err(invalid());
    }

    let token = state.auth.tokens.issue(user.id, &user.email, user.role())?;
    Ok(ApiResponse::success(AuthResponse { token, user }))
}
