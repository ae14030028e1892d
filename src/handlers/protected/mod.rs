// handlers/protected/mod.rs - Protected handlers (JWT authentication required)
//
// Every route here runs behind `authenticate`; most also carry a route
// guard. Checks that depend on the row being touched (ownership, admin
// targets, self-protection) happen inside the handler through `authorize`.
pub mod auth;
pub mod branches;
pub mod classes;
pub mod enrollments;
pub mod lesson_plans;
pub mod messages;
pub mod schools;
pub mod students;
pub mod teachers;
pub mod users;
