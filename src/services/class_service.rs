use uuid::Uuid;

use crate::database::models::{Class, CreateClass, UpdateClass};
use crate::database::{Database, DatabaseError};

const SELECT_CLASS: &str = "SELECT c.id, c.name, c.subject, c.teacher_id, c.branch_id, c.schedule, c.capacity,
            c.created_at, c.updated_at, t.user_id AS owner_user_id
     FROM classes c
     LEFT JOIN teachers t ON t.id = c.teacher_id";

// Writes go through a CTE so the row comes back joined with its owner.
const RETURNING_CLASS: &str = "SELECT w.id, w.name, w.subject, w.teacher_id, w.branch_id, w.schedule, w.capacity,
            w.created_at, w.updated_at, t.user_id AS owner_user_id
     FROM written w
     LEFT JOIN teachers t ON t.id = w.teacher_id";

#[derive(Debug, Clone, Copy, Default)]
pub struct ClassFilter {
    pub teacher_id: Option<Uuid>,
    pub branch_id: Option<Uuid>,
}

#[derive(Clone)]
pub struct ClassService {
    db: Database,
}

impl ClassService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn list(&self, filter: ClassFilter) -> Result<Vec<Class>, DatabaseError> {
        self.db
            .run("classes.list", |pool| async move {
                sqlx::query_as::<_, Class>(&format!(
                    "{SELECT_CLASS}
                     WHERE ($1::uuid IS NULL OR c.teacher_id = $1)
                       AND ($2::uuid IS NULL OR c.branch_id = $2)
                     ORDER BY c.name"
                ))
                .bind(filter.teacher_id)
                .bind(filter.branch_id)
                .fetch_all(&pool)
                .await
            })
            .await
    }

    pub async fn get(&self, id: Uuid) -> Result<Class, DatabaseError> {
        self.db
            .run("classes.get", |pool| async move {
                sqlx::query_as::<_, Class>(&format!("{SELECT_CLASS} WHERE c.id = $1"))
                    .bind(id)
                    .fetch_optional(&pool)
                    .await
            })
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Class {} not found", id)))
    }

    pub async fn create(&self, input: &CreateClass) -> Result<Class, DatabaseError> {
        self.db
            .run("classes.create", |pool| async move {
                sqlx::query_as::<_, Class>(&format!(
                    "WITH written AS (
                        INSERT INTO classes (name, subject, teacher_id, branch_id, schedule, capacity)
                        VALUES ($1, $2, $3, $4, $5, $6)
                        RETURNING *
                     )
                     {RETURNING_CLASS}"
                ))
                .bind(input.name.trim())
                .bind(input.subject.as_deref())
                .bind(input.teacher_id)
                .bind(input.branch_id)
                .bind(input.schedule.as_deref())
                .bind(input.capacity)
                .fetch_one(&pool)
                .await
            })
            .await
    }

    pub async fn update(&self, id: Uuid, input: &UpdateClass) -> Result<Class, DatabaseError> {
        self.db
            .run("classes.update", |pool| async move {
                sqlx::query_as::<_, Class>(&format!(
                    "WITH written AS (
                        UPDATE classes SET
                            name = COALESCE($2, name),
                            subject = COALESCE($3, subject),
                            teacher_id = COALESCE($4, teacher_id),
                            branch_id = COALESCE($5, branch_id),
                            schedule = COALESCE($6, schedule),
                            capacity = COALESCE($7, capacity),
                            updated_at = NOW()
                        WHERE id = $1
                        RETURNING *
                     )
                     {RETURNING_CLASS}"
                ))
                .bind(id)
                .bind(input.name.as_deref().map(str::trim))
                .bind(input.subject.as_deref())
                .bind(input.teacher_id)
                .bind(input.branch_id)
                .bind(input.schedule.as_deref())
                .bind(input.capacity)
                .fetch_optional(&pool)
                .await
            })
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Class {} not found", id)))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DatabaseError> {
        let affected = self
            .db
            .run("classes.delete", |pool| async move {
                sqlx::query("DELETE FROM classes WHERE id = $1")
                    .bind(id)
                    .execute(&pool)
                    .await
                    .map(|result| result.rows_affected())
            })
            .await?;

        if affected == 0 {
            return Err(DatabaseError::NotFound(format!("Class {} not found", id)));
        }
        Ok(())
    }
}
