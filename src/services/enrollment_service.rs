use uuid::Uuid;

use crate::database::models::{CreateEnrollment, Enrollment, EnrollmentFilter};
use crate::database::{Database, DatabaseError};

enum EnrollOutcome {
    Created(Enrollment),
    ClassMissing,
    ClassFull,
}

#[derive(Clone)]
pub struct EnrollmentService {
    db: Database,
}

impl EnrollmentService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn list(&self, filter: EnrollmentFilter) -> Result<Vec<Enrollment>, DatabaseError> {
        self.db
            .run("enrollments.list", |pool| async move {
                sqlx::query_as::<_, Enrollment>(
                    "SELECT id, student_id, class_id, status, enrolled_at
                     FROM enrollments
                     WHERE ($1::uuid IS NULL OR student_id = $1)
                       AND ($2::uuid IS NULL OR class_id = $2)
                     ORDER BY enrolled_at",
                )
                .bind(filter.student_id)
                .bind(filter.class_id)
                .fetch_all(&pool)
                .await
            })
            .await
    }

    pub async fn get(&self, id: Uuid) -> Result<Enrollment, DatabaseError> {
        self.db
            .run("enrollments.get", |pool| async move {
                sqlx::query_as::<_, Enrollment>(
                    "SELECT id, student_id, class_id, status, enrolled_at FROM enrollments WHERE id = $1",
                )
                .bind(id)
                .fetch_optional(&pool)
                .await
            })
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Enrollment {} not found", id)))
    }

    /// Enroll a student. For an active enrollment the class row is locked
    /// while active enrollments are counted against its capacity.
    pub async fn create(&self, input: &CreateEnrollment) -> Result<Enrollment, DatabaseError> {
        let status = input.status.as_deref().unwrap_or("active");
        let outcome = self
            .db
            .run("enrollments.create", |pool| async move {
                let mut tx = pool.begin().await?;

                let capacity: Option<Option<i32>> =
                    sqlx::query_scalar("SELECT capacity FROM classes WHERE id = $1 FOR UPDATE")
                        .bind(input.class_id)
                        .fetch_optional(&mut *tx)
                        .await?;

                let capacity = match capacity {
                    Some(capacity) => capacity,
                    None => return Ok(EnrollOutcome::ClassMissing),
                };

                // Completed and dropped rows never occupy a seat.
                if let (Some(capacity), true) = (capacity, status == "active") {
                    let active: i64 = sqlx::query_scalar(
                        "SELECT COUNT(*) FROM enrollments WHERE class_id = $1 AND status = 'active'",
                    )
                    .bind(input.class_id)
                    .fetch_one(&mut *tx)
                    .await?;
                    if active >= i64::from(capacity) {
                        return Ok(EnrollOutcome::ClassFull);
                    }
                }

                let enrollment = sqlx::query_as::<_, Enrollment>(
                    "INSERT INTO enrollments (student_id, class_id, status)
                     VALUES ($1, $2, $3)
                     RETURNING id, student_id, class_id, status, enrolled_at",
                )
                .bind(input.student_id)
                .bind(input.class_id)
                .bind(status)
                .fetch_one(&mut *tx)
                .await?;

                tx.commit().await?;
                Ok::<_, sqlx::Error>(EnrollOutcome::Created(enrollment))
            })
            .await?;

        match outcome {
            EnrollOutcome::Created(enrollment) => Ok(enrollment),
            EnrollOutcome::ClassMissing => {
                Err(DatabaseError::NotFound(format!("Class {} not found", input.class_id)))
            }
            EnrollOutcome::ClassFull => Err(DatabaseError::Conflict("Class is full".to_string())),
        }
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DatabaseError> {
        let affected = self
            .db
            .run("enrollments.delete", |pool| async move {
                sqlx::query("DELETE FROM enrollments WHERE id = $1")
                    .bind(id)
                    .execute(&pool)
                    .await
                    .map(|result| result.rows_affected())
            })
            .await?;

        if affected == 0 {
            return Err(DatabaseError::NotFound(format!("Enrollment {} not found", id)));
        }
        Ok(())
    }
}
