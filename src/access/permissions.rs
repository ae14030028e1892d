//! Static role/permission table.
//!
//! Every protected operation names an [`Action`]. The table maps each action
//! to the roles allowed to perform it and is built once per process; nothing
//! mutates it afterwards. An action without an entry is a wiring mistake and
//! always denies.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use super::role::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    // Users
    ViewUsers,
    ViewAdminDetails,
    ChangeUserRole,
    DeleteUsers,

    // Students
    ViewStudents,
    CreateStudents,
    UpdateStudents,
    DeleteStudents,

    // Teachers
    ViewTeachers,
    CreateTeachers,
    UpdateTeachers,
    DeleteTeachers,

    // Classes
    ViewClasses,
    CreateClasses,
    UpdateClasses,
    DeleteClasses,

    // Enrollments
    ViewEnrollments,
    CreateEnrollments,
    DeleteEnrollments,

    // Schools and branches
    ViewSchools,
    ManageSchools,
    ViewBranches,
    ManageBranches,

    // Lesson plans
    ViewLessonPlans,
    CreateLessonPlans,
    UpdateLessonPlans,
    DeleteLessonPlans,

    // Messages
    SendMessages,
    ViewAllMessages,
}

impl Action {
    pub const ALL: [Action; 29] = [
        Action::ViewUsers,
        Action::ViewAdminDetails,
        Action::ChangeUserRole,
        Action::DeleteUsers,
        Action::ViewStudents,
        Action::CreateStudents,
        Action::UpdateStudents,
        Action::DeleteStudents,
        Action::ViewTeachers,
        Action::CreateTeachers,
        Action::UpdateTeachers,
        Action::DeleteTeachers,
        Action::ViewClasses,
        Action::CreateClasses,
        Action::UpdateClasses,
        Action::DeleteClasses,
        Action::ViewEnrollments,
        Action::CreateEnrollments,
        Action::DeleteEnrollments,
        Action::ViewSchools,
        Action::ManageSchools,
        Action::ViewBranches,
        Action::ManageBranches,
        Action::ViewLessonPlans,
        Action::CreateLessonPlans,
        Action::UpdateLessonPlans,
        Action::DeleteLessonPlans,
        Action::SendMessages,
        Action::ViewAllMessages,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::ViewUsers => "VIEW_USERS",
            Action::ViewAdminDetails => "VIEW_ADMIN_DETAILS",
            Action::ChangeUserRole => "CHANGE_USER_ROLE",
            Action::DeleteUsers => "DELETE_USERS",
            Action::ViewStudents => "VIEW_STUDENTS",
            Action::CreateStudents => "CREATE_STUDENTS",
            Action::UpdateStudents => "UPDATE_STUDENTS",
            Action::DeleteStudents => "DELETE_STUDENTS",
            Action::ViewTeachers => "VIEW_TEACHERS",
            Action::CreateTeachers => "CREATE_TEACHERS",
            Action::UpdateTeachers => "UPDATE_TEACHERS",
            Action::DeleteTeachers => "DELETE_TEACHERS",
            Action::ViewClasses => "VIEW_CLASSES",
            Action::CreateClasses => "CREATE_CLASSES",
            Action::UpdateClasses => "UPDATE_CLASSES",
            Action::DeleteClasses => "DELETE_CLASSES",
            Action::ViewEnrollments => "VIEW_ENROLLMENTS",
            Action::CreateEnrollments => "CREATE_ENROLLMENTS",
            Action::DeleteEnrollments => "DELETE_ENROLLMENTS",
            Action::ViewSchools => "VIEW_SCHOOLS",
            Action::ManageSchools => "MANAGE_SCHOOLS",
            Action::ViewBranches => "VIEW_BRANCHES",
            Action::ManageBranches => "MANAGE_BRANCHES",
            Action::ViewLessonPlans => "VIEW_LESSON_PLANS",
            Action::CreateLessonPlans => "CREATE_LESSON_PLANS",
            Action::UpdateLessonPlans => "UPDATE_LESSON_PLANS",
            Action::DeleteLessonPlans => "DELETE_LESSON_PLANS",
            Action::SendMessages => "SEND_MESSAGES",
            Action::ViewAllMessages => "VIEW_ALL_MESSAGES",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .iter()
            .copied()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// Closed action → roles mapping. Cloned into an `Arc` once and shared
/// read-only between requests.
#[derive(Debug, Clone)]
pub struct PermissionTable {
    entries: HashMap<Action, Vec<Role>>,
}

static STANDARD: Lazy<Arc<PermissionTable>> = Lazy::new(|| Arc::new(PermissionTable::build_standard()));

impl PermissionTable {
    /// The process-wide table used by the server.
    pub fn standard() -> Arc<PermissionTable> {
        STANDARD.clone()
    }

    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Action, Vec<Role>)>,
    {
        Self { entries: entries.into_iter().collect() }
    }

    fn build_standard() -> Self {
        use Role::*;

        let staff = vec![Superadmin, Admin];
        let faculty = vec![Superadmin, Admin, Teacher];
        let everyone = vec![Superadmin, Admin, Teacher, Student];

        Self::from_entries([
            (Action::ViewUsers, staff.clone()),
            (Action::ViewAdminDetails, vec![Superadmin]),
            (Action::ChangeUserRole, vec![Superadmin]),
            (Action::DeleteUsers, vec![Superadmin]),
            (Action::ViewStudents, faculty.clone()),
            (Action::CreateStudents, staff.clone()),
            (Action::UpdateStudents, staff.clone()),
            (Action::DeleteStudents, staff.clone()),
            (Action::ViewTeachers, faculty.clone()),
            (Action::CreateTeachers, staff.clone()),
            (Action::UpdateTeachers, staff.clone()),
            (Action::DeleteTeachers, staff.clone()),
            (Action::ViewClasses, everyone.clone()),
            (Action::CreateClasses, faculty.clone()),
            (Action::UpdateClasses, faculty.clone()),
            (Action::DeleteClasses, faculty.clone()),
            (Action::ViewEnrollments, faculty.clone()),
            (Action::CreateEnrollments, staff.clone()),
            (Action::DeleteEnrollments, staff.clone()),
            (Action::ViewSchools, everyone.clone()),
            (Action::ManageSchools, vec![Superadmin]),
            (Action::ViewBranches, everyone.clone()),
            (Action::ManageBranches, staff.clone()),
            (Action::ViewLessonPlans, faculty.clone()),
            (Action::CreateLessonPlans, faculty.clone()),
            (Action::UpdateLessonPlans, faculty.clone()),
            (Action::DeleteLessonPlans, faculty),
            (Action::SendMessages, everyone),
            (Action::ViewAllMessages, staff),
        ])
    }

    /// Roles registered for `action`, or `None` when the table has no entry.
    pub fn roles_for(&self, action: Action) -> Option<&[Role]> {
        self.entries.get(&action).map(Vec::as_slice)
    }

    pub fn allows(&self, role: Role, action: Action) -> bool {
        match self.roles_for(action) {
            Some(roles) => roles.contains(&role),
            None => {
                tracing::error!("Permission table has no entry for action {}; denying", action);
                false
            }
        }
    }

    /// Lookup by wire name, for callers holding an action string.
    pub fn allows_named(&self, role: Role, action: &str) -> bool {
        match action.parse::<Action>() {
            Ok(action) => self.allows(role, action),
            Err(name) => {
                tracing::error!("Unknown permission action '{}' queried; denying", name);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_covers_every_action() {
        let table = PermissionTable::standard();
        for action in Action::ALL {
            assert!(table.roles_for(action).is_some(), "missing entry for {}", action);
        }
    }

    #[test]
    fn allows_matches_table_membership() {
        let table = PermissionTable::standard();
        for action in Action::ALL {
            let roles = table.roles_for(action).unwrap();
            for role in Role::ALL {
                assert_eq!(table.allows(role, action), roles.contains(&role), "{} / {}", role, action);
            }
        }
    }

    #[test]
    fn superadmin_passes_every_entry() {
        let table = PermissionTable::standard();
        for action in Action::ALL {
            assert!(table.allows(Role::Superadmin, action), "superadmin denied {}", action);
        }
    }

    #[test]
    fn only_superadmin_views_admin_details() {
        let table = PermissionTable::standard();
        for role in [Role::Admin, Role::Teacher, Role::Student] {
            assert!(!table.allows(role, Action::ViewAdminDetails));
        }
    }

    #[test]
    fn missing_entry_denies_everyone() {
        let table = PermissionTable::from_entries([(Action::ViewClasses, vec![Role::Student])]);
        for role in Role::ALL {
            assert!(!table.allows(role, Action::DeleteUsers));
        }
        assert!(table.allows(Role::Student, Action::ViewClasses));
    }

    #[test]
    fn unknown_action_name_denies() {
        let table = PermissionTable::standard();
        assert!(!table.allows_named(Role::Superadmin, "LAUNCH_ROCKETS"));
        assert!(table.allows_named(Role::Admin, "VIEW_USERS"));
    }

    #[test]
    fn action_names_round_trip() {
        for action in Action::ALL {
            assert_eq!(action.as_str().parse::<Action>().unwrap(), action);
            assert_eq!(serde_json::to_value(action).unwrap(), action.as_str());
        }
    }
}
