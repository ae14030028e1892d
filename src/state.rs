use axum::extract::FromRef;
use std::sync::Arc;

use crate::access::PermissionTable;
use crate::auth::TokenService;
use crate::config::AppConfig;
use crate::database::{Database, IdentityStore};
use crate::services::{
    BranchService, ClassService, EnrollmentService, LessonPlanService, MessageService, SchoolService,
    StudentService, TeacherService, UserService,
};

/// Everything the authentication and authorization gates need. Split out
/// of [`AppState`] so the gates can run without a database.
#[derive(Clone)]
pub struct AuthState {
    pub tokens: Arc<TokenService>,
    pub permissions: Arc<PermissionTable>,
    pub identities: Arc<dyn IdentityStore>,
}

impl AuthState {
    pub fn new(
        tokens: Arc<TokenService>,
        permissions: Arc<PermissionTable>,
        identities: Arc<dyn IdentityStore>,
    ) -> Self {
        Self { tokens, permissions, identities }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: Database,
    pub auth: AuthState,
    pub users: UserService,
    pub schools: SchoolService,
    pub branches: BranchService,
    pub teachers: TeacherService,
    pub students: StudentService,
    pub classes: ClassService,
    pub enrollments: EnrollmentService,
    pub lesson_plans: LessonPlanService,
    pub messages: MessageService,
}

impl AppState {
    pub fn new(config: AppConfig, db: Database, tokens: TokenService) -> Self {
        let users = UserService::new(db.clone());
        let auth = AuthState::new(Arc::new(tokens), PermissionTable::standard(), Arc::new(users.clone()));

        Self {
            config: Arc::new(config),
            auth,
            users,
            schools: SchoolService::new(db.clone()),
            branches: BranchService::new(db.clone()),
            teachers: TeacherService::new(db.clone()),
            students: StudentService::new(db.clone()),
            classes: ClassService::new(db.clone()),
            enrollments: EnrollmentService::new(db.clone()),
            lesson_plans: LessonPlanService::new(db.clone()),
            messages: MessageService::new(db.clone()),
            db,
        }
    }

    pub fn permissions(&self) -> &PermissionTable {
        &self.auth.permissions
    }
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}
