use axum::{
    http::HeaderValue,
    middleware::from_fn_with_state,
    routing::{delete, get, post, put, MethodRouter},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::access::{Action, PermissionTable, Requirement};
use crate::config::SecurityConfig;
use crate::handlers::{protected, public};
use crate::middleware::{authenticate, guarded};
use crate::state::AppState;

/// The full application router.
pub fn app(state: AppState) -> Router {
    let permissions = state.auth.permissions.clone();

    let protected = Router::new()
        .merge(auth_routes())
        .merge(user_routes(&permissions))
        .merge(school_routes(&permissions))
        .merge(branch_routes(&permissions))
        .merge(teacher_routes(&permissions))
        .merge(student_routes(&permissions))
        .merge(class_routes(&permissions))
        .merge(enrollment_routes(&permissions))
        .merge(lesson_plan_routes(&permissions))
        .merge(message_routes(&permissions))
        .route_layer(from_fn_with_state(state.auth.clone(), authenticate));

    Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        .merge(auth_public_routes())
        // Protected API
        .merge(protected)
        // Global middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&state.config.security)),
        )
        .with_state(state)
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if !security.enable_cors {
        return CorsLayer::new();
    }
    if security.cors_origins.is_empty() || security.cors_origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

type Guarded = MethodRouter<AppState>;

fn action(route: Guarded, permissions: &Arc<PermissionTable>, action: Action) -> Guarded {
    guarded(route, permissions, Requirement::Action(action))
}

fn auth_public_routes() -> Router<AppState> {
    use public::auth;

    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
}

fn auth_routes() -> Router<AppState> {
    use protected::auth;

    Router::new()
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/password", put(auth::change_password))
}

fn user_routes(permissions: &Arc<PermissionTable>) -> Router<AppState> {
    use protected::users;

    Router::new()
        .route("/api/users", action(get(users::list), permissions, Action::ViewUsers))
        .route(
            "/api/users/:id",
            // GET checks ownership and admin targets inside the handler
            get(users::get).merge(action(delete(users::delete), permissions, Action::DeleteUsers)),
        )
        .route("/api/users/:id/role", action(put(users::change_role), permissions, Action::ChangeUserRole))
}

fn school_routes(permissions: &Arc<PermissionTable>) -> Router<AppState> {
    use protected::schools;

    Router::new()
        .route(
            "/api/schools",
            action(get(schools::list), permissions, Action::ViewSchools)
                .merge(action(post(schools::create), permissions, Action::ManageSchools)),
        )
        .route(
            "/api/schools/:id",
            action(get(schools::get), permissions, Action::ViewSchools)
                .merge(action(put(schools::update), permissions, Action::ManageSchools))
                .merge(action(delete(schools::delete), permissions, Action::ManageSchools)),
        )
}

fn branch_routes(permissions: &Arc<PermissionTable>) -> Router<AppState> {
    use protected::branches;

    Router::new()
        .route(
            "/api/branches",
            action(get(branches::list), permissions, Action::ViewBranches)
                .merge(action(post(branches::create), permissions, Action::ManageBranches)),
        )
        .route(
            "/api/branches/:id",
            action(get(branches::get), permissions, Action::ViewBranches)
                .merge(action(put(branches::update), permissions, Action::ManageBranches))
                .merge(action(delete(branches::delete), permissions, Action::ManageBranches)),
        )
}

fn teacher_routes(permissions: &Arc<PermissionTable>) -> Router<AppState> {
    use protected::teachers;

    Router::new()
        .route(
            "/api/teachers",
            action(get(teachers::list), permissions, Action::ViewTeachers)
                .merge(action(post(teachers::create), permissions, Action::CreateTeachers)),
        )
        .route(
            "/api/teachers/:id",
            get(teachers::get)
                .merge(action(put(teachers::update), permissions, Action::UpdateTeachers))
                .merge(action(delete(teachers::delete), permissions, Action::DeleteTeachers)),
        )
}

fn student_routes(permissions: &Arc<PermissionTable>) -> Router<AppState> {
    use protected::students;

    Router::new()
        .route(
            "/api/students",
            action(get(students::list), permissions, Action::ViewStudents)
                .merge(action(post(students::create), permissions, Action::CreateStudents)),
        )
        .route(
            "/api/students/:id",
            get(students::get)
                .merge(action(put(students::update), permissions, Action::UpdateStudents))
                .merge(action(delete(students::delete), permissions, Action::DeleteStudents)),
        )
}

fn class_routes(permissions: &Arc<PermissionTable>) -> Router<AppState> {
    use protected::classes;

    Router::new()
        .route(
            "/api/classes",
            action(get(classes::list), permissions, Action::ViewClasses)
                .merge(action(post(classes::create), permissions, Action::CreateClasses)),
        )
        .route(
            "/api/classes/:id",
            action(get(classes::get), permissions, Action::ViewClasses)
                .merge(action(put(classes::update), permissions, Action::UpdateClasses))
                .merge(action(delete(classes::delete), permissions, Action::DeleteClasses)),
        )
        .route(
            "/api/classes/:id/students",
            action(get(classes::students), permissions, Action::ViewEnrollments),
        )
}

fn enrollment_routes(permissions: &Arc<PermissionTable>) -> Router<AppState> {
    use protected::enrollments;

    Router::new()
        .route(
            "/api/enrollments",
            action(get(enrollments::list), permissions, Action::ViewEnrollments)
                .merge(action(post(enrollments::create), permissions, Action::CreateEnrollments)),
        )
        .route(
            "/api/enrollments/:id",
            action(get(enrollments::get), permissions, Action::ViewEnrollments)
                .merge(action(delete(enrollments::delete), permissions, Action::DeleteEnrollments)),
        )
}

fn lesson_plan_routes(permissions: &Arc<PermissionTable>) -> Router<AppState> {
    use protected::lesson_plans;

    Router::new()
        .route(
            "/api/lesson-plans",
            action(get(lesson_plans::list), permissions, Action::ViewLessonPlans)
                .merge(action(post(lesson_plans::create), permissions, Action::CreateLessonPlans)),
        )
        .route(
            "/api/lesson-plans/:id",
            action(get(lesson_plans::get), permissions, Action::ViewLessonPlans)
                .merge(action(put(lesson_plans::update), permissions, Action::UpdateLessonPlans))
                .merge(action(delete(lesson_plans::delete), permissions, Action::DeleteLessonPlans)),
        )
}

fn message_routes(permissions: &Arc<PermissionTable>) -> Router<AppState> {
    use protected::messages;

    // Reads and deletes are scoped to sender/recipient inside the handlers.
    Router::new()
        .route(
            "/api/messages",
            get(messages::list).merge(action(post(messages::send), permissions, Action::SendMessages)),
        )
        .route("/api/messages/:id", get(messages::get).delete(messages::delete))
        .route("/api/messages/:id/read", put(messages::mark_read))
}
