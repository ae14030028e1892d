pub mod branch_service;
pub mod class_service;
pub mod enrollment_service;
pub mod lesson_plan_service;
pub mod message_service;
pub mod school_service;
pub mod student_service;
pub mod teacher_service;
pub mod user_service;

pub use branch_service::BranchService;
pub use class_service::{ClassFilter, ClassService};
pub use enrollment_service::EnrollmentService;
pub use lesson_plan_service::LessonPlanService;
pub use message_service::MessageService;
pub use school_service::SchoolService;
pub use student_service::StudentService;
pub use teacher_service::TeacherService;
pub use user_service::UserService;
