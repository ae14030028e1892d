use async_trait::async_trait;
use uuid::Uuid;

use crate::access::Role;
use crate::database::models::{NewUser, User};
use crate::database::{Database, DatabaseError, IdentityStore};

const SELECT_USER: &str = "SELECT id, email, password_hash, name, role, phone, phone_verified, created_at, updated_at
     FROM users";

/// Credential store backed by the `users` table.
#[derive(Clone)]
pub struct UserService {
    db: Database,
}

impl UserService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> Result<Vec<User>, DatabaseError> {
        self.db
            .run("users.list", |pool| async move {
                sqlx::query_as::<_, User>(&format!("{SELECT_USER} ORDER BY created_at"))
                    .fetch_all(&pool)
                    .await
            })
            .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        self.db
            .run("users.find_by_id", |pool| async move {
                sqlx::query_as::<_, User>(&format!("{SELECT_USER} WHERE id = $1"))
                    .bind(id)
                    .fetch_optional(&pool)
                    .await
            })
            .await
    }

    pub async fn get(&self, id: Uuid) -> Result<User, DatabaseError> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("User {} not found", id)))
    }

    /// Emails are matched case-insensitively; they are stored lowercased.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let email = email.trim().to_lowercase();
        let email = email.as_str();
        self.db
            .run("users.find_by_email", |pool| async move {
                sqlx::query_as::<_, User>(&format!("{SELECT_USER} WHERE email = $1"))
                    .bind(email)
                    .fetch_optional(&pool)
                    .await
            })
            .await
    }

    pub async fn create(&self, new_user: &NewUser) -> Result<User, DatabaseError> {
        let email = new_user.email.trim().to_lowercase();
        let email = email.as_str();
        self.db
            .run("users.create", |pool| async move {
                sqlx::query_as::<_, User>(
                    "INSERT INTO users (email, password_hash, name, role, phone)
                     VALUES ($1, $2, $3, $4, $5)
                     RETURNING id, email, password_hash, name, role, phone, phone_verified, created_at, updated_at",
                )
                .bind(email)
                .bind(&new_user.password_hash)
                .bind(&new_user.name)
                .bind(new_user.role.as_str())
                .bind(new_user.phone.as_deref())
                .fetch_one(&pool)
                .await
            })
            .await
    }

    pub async fn update_role(&self, id: Uuid, role: Role) -> Result<User, DatabaseError> {
        self.db
            .run("users.update_role", |pool| async move {
                sqlx::query_as::<_, User>(
                    "UPDATE users SET role = $2, updated_at = NOW() WHERE id = $1
                     RETURNING id, email, password_hash, name, role, phone, phone_verified, created_at, updated_at",
                )
                .bind(id)
                .bind(role.as_str())
                .fetch_optional(&pool)
                .await
            })
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("User {} not found", id)))
    }

    pub async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), DatabaseError> {
        let affected = self
            .db
            .run("users.update_password", |pool| async move {
                sqlx::query("UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1")
                    .bind(id)
                    .bind(password_hash)
                    .execute(&pool)
                    .await
                    .map(|result| result.rows_affected())
            })
            .await?;

        if affected == 0 {
            return Err(DatabaseError::NotFound(format!("User {} not found", id)));
        }
        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DatabaseError> {
        let affected = self
            .db
            .run("users.delete", |pool| async move {
                sqlx::query("DELETE FROM users WHERE id = $1")
                    .bind(id)
                    .execute(&pool)
                    .await
                    .map(|result| result.rows_affected())
            })
            .await?;

        if affected == 0 {
            return Err(DatabaseError::NotFound(format!("User {} not found", id)));
        }
        Ok(())
    }
}

#[async_trait]
impl IdentityStore for UserService {
    async fn find_user(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        self.find_by_id(id).await
    }
}
