use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::access::Role;

/// Row from `users`. `role` stays a string at the storage boundary and is
/// parsed with [`User::role`].
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    #[serde(rename = "role")]
    #[sqlx(rename = "role")]
    pub role_name: String,
    pub phone: Option<String>,
    pub phone_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Unknown role strings (hand-edited rows) fall back to the least
    /// privileged role.
    pub fn role(&self) -> Role {
        self.role_name.parse().unwrap_or_else(|_| {
            tracing::error!("User {} has unknown role '{}'; treating as student", self.id, self.role_name);
            Role::Student
        })
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: Role,
    pub phone: Option<String>,
}
