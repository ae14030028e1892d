pub mod branch;
pub mod class;
pub mod enrollment;
pub mod lesson_plan;
pub mod message;
pub mod school;
pub mod student;
pub mod teacher;
pub mod user;

pub use branch::{Branch, CreateBranch, UpdateBranch};
pub use class::{Class, CreateClass, UpdateClass};
pub use enrollment::{CreateEnrollment, Enrollment, EnrollmentFilter};
pub use lesson_plan::{CreateLessonPlan, LessonPlan, UpdateLessonPlan};
pub use message::{Message, SendMessage};
pub use school::{CreateSchool, School, UpdateSchool};
pub use student::{CreateStudent, Student, UpdateStudent};
pub use teacher::{CreateTeacher, Teacher, UpdateTeacher};
pub use user::{NewUser, User};
