use crate::access::Role;
use crate::database::DatabaseError;

/// Why a request was refused by the authentication or authorization gate.
/// None of these are transient; callers never retry them.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("User not found")]
    UserNotFound,

    #[error("Access forbidden")]
    Forbidden { required: Vec<Role>, current: Role },

    #[error("Access forbidden: resource belongs to another user")]
    NotOwner { current: Role },

    #[error("You cannot {0} your own account")]
    SelfActionForbidden(&'static str),

    #[error("Identity lookup failed: {0}")]
    Store(#[from] DatabaseError),

    #[error("Token signing failed: {0}")]
    Signing(String),
}
