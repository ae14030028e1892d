pub mod identity;
pub mod manager;
pub mod models;
pub mod retry;

pub use identity::{IdentityStore, MemoryIdentityStore};
pub use manager::{Database, DatabaseError};
pub use retry::RetryPolicy;
