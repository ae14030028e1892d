use axum::{
    extract::{Request, State},
    middleware::{from_fn_with_state, Next},
    response::Response,
    routing::MethodRouter,
};
use std::sync::Arc;

use super::auth::CurrentUser;
use crate::access::{decide, Decision, PermissionTable, Requirement};
use crate::auth::AuthError;
use crate::error::ApiError;

/// Route-level authorization: one requirement checked against the
/// permission table for every request reaching the route.
#[derive(Clone)]
pub struct Guard {
    permissions: Arc<PermissionTable>,
    requirement: Requirement,
}

impl Guard {
    pub fn new(permissions: Arc<PermissionTable>, requirement: Requirement) -> Self {
        Self { permissions, requirement }
    }
}

/// Middleware behind [`Guard`]. Must run inside `authenticate`.
pub async fn require(State(guard): State<Guard>, request: Request, next: Next) -> Result<Response, ApiError> {
    {
        let current = request
            .extensions()
            .get::<CurrentUser>()
            .ok_or(AuthError::AuthenticationRequired)?;
        authorize(&guard.permissions, current, &guard.requirement)?;
    }
    Ok(next.run(request).await)
}

/// Handler-level form of the same check, for requirements that depend on
/// the resource being touched.
pub fn authorize(
    permissions: &PermissionTable,
    current: &CurrentUser,
    requirement: &Requirement,
) -> Result<(), ApiError> {
    let decision = decide(permissions, &current.caller(), requirement);
    if let Decision::Deny(reason) = &decision {
        tracing::warn!(
            "Denied user {} (role {}) for {:?}: {:?}",
            current.id,
            current.role,
            requirement,
            reason
        );
    }
    decision.into_result().map_err(ApiError::from)
}

/// Attach a [`Guard`] to a method router.
pub fn guarded<S>(route: MethodRouter<S>, permissions: &Arc<PermissionTable>, requirement: Requirement) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    route.route_layer(from_fn_with_state(Guard::new(permissions.clone(), requirement), require))
}
