use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET / - service information
pub async fn root() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "name": "School API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "School and class management REST API",
            "endpoints": {
                "auth": "/auth/register, /auth/login (public)",
                "session": "/api/auth/me, /api/auth/password (protected)",
                "users": "/api/users[/:id] (protected)",
                "schools": "/api/schools[/:id] (protected)",
                "branches": "/api/branches[/:id] (protected)",
                "teachers": "/api/teachers[/:id] (protected)",
                "students": "/api/students[/:id] (protected)",
                "classes": "/api/classes[/:id[/students]] (protected)",
                "enrollments": "/api/enrollments[/:id] (protected)",
                "lesson_plans": "/api/lesson-plans[/:id] (protected)",
                "messages": "/api/messages[/:id[/read]] (protected)",
            }
        }
    }))
}

/// GET /health - database ping
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.db.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "error": "Database unavailable",
                    "code": "SERVICE_UNAVAILABLE",
                    "data": {
                        "status": "degraded",
                        "timestamp": now
                    }
                })),
            )
        }
    }
}
