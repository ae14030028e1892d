use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const ENROLLMENT_STATUSES: [&str; 3] = ["active", "completed", "dropped"];

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Enrollment {
    pub id: Uuid,
    pub student_id: Uuid,
    pub class_id: Uuid,
    pub status: String,
    pub enrolled_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateEnrollment {
    pub student_id: Uuid,
    pub class_id: Uuid,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnrollmentFilter {
    pub student_id: Option<Uuid>,
    pub class_id: Option<Uuid>,
}
