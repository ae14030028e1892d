use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LessonPlan {
    pub id: Uuid,
    pub teacher_id: Uuid,
    pub class_id: Option<Uuid>,
    pub title: String,
    pub content: Option<String>,
    pub objectives: Option<String>,
    pub lesson_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub owner_user_id: Option<Uuid>,
}

/// `teacher_id` may be omitted by teachers; it is then resolved from the
/// caller's linked teacher profile.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLessonPlan {
    pub teacher_id: Option<Uuid>,
    pub class_id: Option<Uuid>,
    pub title: String,
    pub content: Option<String>,
    pub objectives: Option<String>,
    pub lesson_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateLessonPlan {
    pub class_id: Option<Uuid>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub objectives: Option<String>,
    pub lesson_date: Option<NaiveDate>,
}
