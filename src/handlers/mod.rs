// handlers/mod.rs - Two-tier handler layout
//
// Public (no auth) → Protected (JWT auth, then per-route role guard)
pub mod protected; // /api/*
pub mod public; // /, /health, /auth/*
pub mod validate;
