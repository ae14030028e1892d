// handlers/protected/messages.rs - /api/messages

use axum::extract::State;
use serde::Deserialize;
use uuid::Uuid;

use crate::access::{Action, Requirement};
use crate::auth::AuthError;
use crate::database::models::{Message, SendMessage};
use crate::error::ApiError;
use crate::handlers::validate;
use crate::middleware::{authorize, ApiResponse, ApiResult, AppJson, AppPath, AppQuery, CurrentUser};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct MessageQuery {
    #[serde(default)]
    pub all: bool,
}

/// GET /api/messages - the caller's inbox and sent items; `?all=true`
/// lists every message and needs VIEW_ALL_MESSAGES.
pub async fn list(
    State(state): State<AppState>,
    current: CurrentUser,
    AppQuery(query): AppQuery<MessageQuery>,
) -> ApiResult<Vec<Message>> {
    if query.all {
        authorize(state.permissions(), &current, &Requirement::Action(Action::ViewAllMessages))?;
        return Ok(ApiResponse::success(state.messages.list_all().await?));
    }
    Ok(ApiResponse::success(state.messages.list_for_user(current.id).await?))
}

/// POST /api/messages - route guard: SEND_MESSAGES. The sender is always
/// the caller.
pub async fn send(
    State(state): State<AppState>,
    current: CurrentUser,
    AppJson(body): AppJson<SendMessage>,
) -> ApiResult<Message> {
    validate::required("body", &body.body)?;

    if state.users.find_by_id(body.recipient_id).await?.is_none() {
        return Err(ApiError::field_error("recipient_id", "Recipient does not exist"));
    }

    let message = state.messages.send(current.id, &body).await?;
    tracing::debug!("User {} sent message {} to {}", current.id, message.id, message.recipient_id);
    Ok(ApiResponse::created(message))
}

/// GET /api/messages/:id - sender, recipient, or VIEW_ALL_MESSAGES
pub async fn get(
    State(state): State<AppState>,
    current: CurrentUser,
    AppPath(id): AppPath<Uuid>,
) -> ApiResult<Message> {
    let message = state.messages.get(id).await?;
    let owner = if message.recipient_id == current.id { message.recipient_id } else { message.sender_id };
    authorize(
        state.permissions(),
        &current,
        &Requirement::OwnerOr { action: Action::ViewAllMessages, owner: Some(owner) },
    )?;
    Ok(ApiResponse::success(message))
}

/// PUT /api/messages/:id/read - recipient only
pub async fn mark_read(
    State(state): State<AppState>,
    current: CurrentUser,
    AppPath(id): AppPath<Uuid>,
) -> ApiResult<Message> {
    let message = state.messages.get(id).await?;
    if message.recipient_id != current.id {
        return Err(AuthError::NotOwner { current: current.role }.into());
    }
    Ok(ApiResponse::success(state.messages.mark_read(id).await?))
}

/// DELETE /api/messages/:id - sender, or VIEW_ALL_MESSAGES
pub async fn delete(
    State(state): State<AppState>,
    current: CurrentUser,
    AppPath(id): AppPath<Uuid>,
) -> ApiResult<()> {
    let message = state.messages.get(id).await?;
    authorize(
        state.permissions(),
        &current,
        &Requirement::OwnerOr { action: Action::ViewAllMessages, owner: Some(message.sender_id) },
    )?;

    state.messages.delete(id).await?;
    Ok(ApiResponse::no_content())
}
