// handlers/public/mod.rs - Public handlers (no authentication)
pub mod auth;
pub mod root;

pub use root::{health, root};
