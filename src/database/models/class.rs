use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A class, optionally joined with the linked user of its teacher
/// (`owner_user_id`) so ownership checks need no second query.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Class {
    pub id: Uuid,
    pub name: String,
    pub subject: Option<String>,
    pub teacher_id: Option<Uuid>,
    pub branch_id: Option<Uuid>,
    pub schedule: Option<String>,
    pub capacity: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub owner_user_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateClass {
    pub name: String,
    pub subject: Option<String>,
    pub teacher_id: Option<Uuid>,
    pub branch_id: Option<Uuid>,
    pub schedule: Option<String>,
    pub capacity: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateClass {
    pub name: Option<String>,
    pub subject: Option<String>,
    pub teacher_id: Option<Uuid>,
    pub branch_id: Option<Uuid>,
    pub schedule: Option<String>,
    pub capacity: Option<i32>,
}
