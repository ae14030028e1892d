//! Session tokens, password hashing, and the auth error taxonomy.

pub mod error;
pub mod password;
pub mod token;

pub use error::AuthError;
pub use token::{Claims, IssuedToken, TokenService, DEFAULT_TOKEN_TTL_HOURS};
