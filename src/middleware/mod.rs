pub mod auth;
pub mod authorize;
pub mod extract;
pub mod response;

pub use auth::{authenticate, CurrentUser};
pub use authorize::{authorize, guarded, require, Guard};
pub use extract::{AppJson, AppPath, AppQuery};
pub use response::{ApiResponse, ApiResult};
