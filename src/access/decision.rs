//! The single authorization decision.
//!
//! `decide` is pure: it sees the permission table, who is asking, and what
//! the route requires. Middleware and handlers both funnel through it.

use uuid::Uuid;

use super::permissions::{Action, PermissionTable};
use super::role::Role;
use crate::auth::AuthError;

/// The parts of a caller identity a decision depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub id: Uuid,
    pub role: Role,
}

#[derive(Debug, Clone, Copy)]
pub enum Requirement {
    /// Caller's role must be in the explicit list.
    Roles(&'static [Role]),
    /// Caller's role must be registered for the action.
    Action(Action),
    /// Allowed when the caller is `owner`; otherwise falls back to the table.
    OwnerOr { action: Action, owner: Option<Uuid> },
    /// Caller must pass the table and, unless admin or superadmin, own the
    /// resource.
    OwnedResource { action: Action, owner: Option<Uuid> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenyReason {
    InsufficientRole { required: Vec<Role>, current: Role },
    NotOwner { current: Role },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    pub fn into_result(self) -> Result<(), AuthError> {
        match self {
            Decision::Allow => Ok(()),
            Decision::Deny(DenyReason::InsufficientRole { required, current }) => {
                Err(AuthError::Forbidden { required, current })
            }
            Decision::Deny(DenyReason::NotOwner { current }) => Err(AuthError::NotOwner { current }),
        }
    }
}

pub fn decide(table: &PermissionTable, caller: &Caller, requirement: &Requirement) -> Decision {
    match *requirement {
        Requirement::Roles(roles) => role_gate(roles, caller.role),
        Requirement::Action(action) => table_gate(table, caller.role, action),
        Requirement::OwnerOr { action, owner } => {
            if owner == Some(caller.id) {
                Decision::Allow
            } else {
                table_gate(table, caller.role, action)
            }
        }
        Requirement::OwnedResource { action, owner } => {
            let base = table_gate(table, caller.role, action);
            if !base.is_allowed() || caller.role.is_administrative() {
                return base;
            }
            if owner == Some(caller.id) {
                Decision::Allow
            } else {
                Decision::Deny(DenyReason::NotOwner { current: caller.role })
            }
        }
    }
}

fn role_gate(roles: &[Role], current: Role) -> Decision {
    if roles.contains(&current) {
        Decision::Allow
    } else {
        Decision::Deny(DenyReason::InsufficientRole { required: roles.to_vec(), current })
    }
}

fn table_gate(table: &PermissionTable, current: Role, action: Action) -> Decision {
    if table.allows(current, action) {
        return Decision::Allow;
    }
    let required = table.roles_for(action).map(<[Role]>::to_vec).unwrap_or_default();
    Decision::Deny(DenyReason::InsufficientRole { required, current })
}

/// Rejects a caller acting on their own account. Layered after the role
/// check on role-change and delete endpoints.
pub fn forbid_self_action(caller: &Caller, target: Uuid, operation: &'static str) -> Result<(), AuthError> {
    if caller.id == target {
        tracing::warn!("User {} attempted to {} their own account", caller.id, operation);
        return Err(AuthError::SelfActionForbidden(operation));
    }
    Ok(())
}
