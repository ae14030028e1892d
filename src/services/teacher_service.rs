use uuid::Uuid;

use crate::database::models::{CreateTeacher, Teacher, UpdateTeacher};
use crate::database::{Database, DatabaseError};

const SELECT_TEACHER: &str = "SELECT id, user_id, branch_id, first_name, last_name, email, phone, subject,
            created_at, updated_at
     FROM teachers";

#[derive(Clone)]
pub struct TeacherService {
    db: Database,
}

impl TeacherService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn list(&self, branch_id: Option<Uuid>) -> Result<Vec<Teacher>, DatabaseError> {
        self.db
            .run("teachers.list", |pool| async move {
                sqlx::query_as::<_, Teacher>(&format!(
                    "{SELECT_TEACHER} WHERE ($1::uuid IS NULL OR branch_id = $1) ORDER BY last_name, first_name"
                ))
                .bind(branch_id)
                .fetch_all(&pool)
                .await
            })
            .await
    }

    pub async fn get(&self, id: Uuid) -> Result<Teacher, DatabaseError> {
        self.db
            .run("teachers.get", |pool| async move {
                sqlx::query_as::<_, Teacher>(&format!("{SELECT_TEACHER} WHERE id = $1"))
                    .bind(id)
                    .fetch_optional(&pool)
                    .await
            })
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Teacher {} not found", id)))
    }

    /// The teacher profile linked to a login, if any.
    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Teacher>, DatabaseError> {
        self.db
            .run("teachers.find_by_user", |pool| async move {
                sqlx::query_as::<_, Teacher>(&format!("{SELECT_TEACHER} WHERE user_id = $1"))
                    .bind(user_id)
                    .fetch_optional(&pool)
                    .await
            })
            .await
    }

    pub async fn create(&self, input: &CreateTeacher) -> Result<Teacher, DatabaseError> {
        let email = input.email.trim().to_lowercase();
        let email = email.as_str();
        self.db
            .run("teachers.create", |pool| async move {
                sqlx::query_as::<_, Teacher>(
                    "INSERT INTO teachers (user_id, branch_id, first_name, last_name, email, phone, subject)
                     VALUES ($1, $2, $3, $4, $5, $6, $7)
                     RETURNING id, user_id, branch_id, first_name, last_name, email, phone, subject,
                               created_at, updated_at",
                )
                .bind(input.user_id)
                .bind(input.branch_id)
                .bind(input.first_name.trim())
                .bind(input.last_name.trim())
                .bind(email)
                .bind(input.phone.as_deref())
                .bind(input.subject.as_deref())
                .fetch_one(&pool)
                .await
            })
            .await
    }

    pub async fn update(&self, id: Uuid, input: &UpdateTeacher) -> Result<Teacher, DatabaseError> {
        let email = input.email.as_deref().map(|e| e.trim().to_lowercase());
        let email = email.as_deref();
        self.db
            .run("teachers.update", |pool| async move {
                sqlx::query_as::<_, Teacher>(
                    "UPDATE teachers SET
                        user_id = COALESCE($2, user_id),
                        branch_id = COALESCE($3, branch_id),
                        first_name = COALESCE($4, first_name),
                        last_name = COALESCE($5, last_name),
                        email = COALESCE($6, email),
                        phone = COALESCE($7, phone),
                        subject = COALESCE($8, subject),
                        updated_at = NOW()
                     WHERE id = $1
                     RETURNING id, user_id, branch_id, first_name, last_name, email, phone, subject,
                               created_at, updated_at",
                )
                .bind(id)
                .bind(input.user_id)
                .bind(input.branch_id)
                .bind(input.first_name.as_deref().map(str::trim))
                .bind(input.last_name.as_deref().map(str::trim))
                .bind(email)
                .bind(input.phone.as_deref())
                .bind(input.subject.as_deref())
                .fetch_optional(&pool)
                .await
            })
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Teacher {} not found", id)))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DatabaseError> {
        let affected = self
            .db
            .run("teachers.delete", |pool| async move {
                sqlx::query("DELETE FROM teachers WHERE id = $1")
                    .bind(id)
                    .execute(&pool)
                    .await
                    .map(|result| result.rows_affected())
            })
            .await?;

        if affected == 0 {
            return Err(DatabaseError::NotFound(format!("Teacher {} not found", id)));
        }
        Ok(())
    }
}
