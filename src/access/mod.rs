//! Role-based access control: roles, the permission table, and the
//! decision function the authorization gate is built on.

pub mod decision;
pub mod permissions;
pub mod role;

pub use decision::{decide, forbid_self_action, Caller, Decision, DenyReason, Requirement};
pub use permissions::{Action, PermissionTable};
pub use role::Role;
