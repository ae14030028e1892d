use uuid::Uuid;

use crate::database::models::{CreateStudent, Student, UpdateStudent};
use crate::database::{Database, DatabaseError};

const SELECT_STUDENT: &str = "SELECT s.id, s.user_id, s.branch_id, s.first_name, s.last_name, s.email, s.phone,
            s.date_of_birth, s.guardian_name, s.guardian_phone, s.created_at, s.updated_at
     FROM students s";

const RETURNING_STUDENT: &str = "RETURNING id, user_id, branch_id, first_name, last_name, email, phone,
               date_of_birth, guardian_name, guardian_phone, created_at, updated_at";

#[derive(Clone)]
pub struct StudentService {
    db: Database,
}

impl StudentService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn list(&self, branch_id: Option<Uuid>) -> Result<Vec<Student>, DatabaseError> {
        self.db
            .run("students.list", |pool| async move {
                sqlx::query_as::<_, Student>(&format!(
                    "{SELECT_STUDENT} WHERE ($1::uuid IS NULL OR s.branch_id = $1) ORDER BY s.last_name, s.first_name"
                ))
                .bind(branch_id)
                .fetch_all(&pool)
                .await
            })
            .await
    }

    pub async fn get(&self, id: Uuid) -> Result<Student, DatabaseError> {
        self.db
            .run("students.get", |pool| async move {
                sqlx::query_as::<_, Student>(&format!("{SELECT_STUDENT} WHERE s.id = $1"))
                    .bind(id)
                    .fetch_optional(&pool)
                    .await
            })
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Student {} not found", id)))
    }

    /// Students currently enrolled in a class.
    pub async fn list_for_class(&self, class_id: Uuid) -> Result<Vec<Student>, DatabaseError> {
        self.db
            .run("students.list_for_class", |pool| async move {
                sqlx::query_as::<_, Student>(&format!(
                    "{SELECT_STUDENT}
                     JOIN enrollments e ON e.student_id = s.id
                     WHERE e.class_id = $1 AND e.status = 'active'
                     ORDER BY s.last_name, s.first_name"
                ))
                .bind(class_id)
                .fetch_all(&pool)
                .await
            })
            .await
    }

    pub async fn create(&self, input: &CreateStudent) -> Result<Student, DatabaseError> {
        let email = input.email.as_deref().map(|e| e.trim().to_lowercase());
        let email = email.as_deref();
        self.db
            .run("students.create", |pool| async move {
                sqlx::query_as::<_, Student>(&format!(
                    "INSERT INTO students (user_id, branch_id, first_name, last_name, email, phone,
                                           date_of_birth, guardian_name, guardian_phone)
                     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                     {RETURNING_STUDENT}"
                ))
                .bind(input.user_id)
                .bind(input.branch_id)
                .bind(input.first_name.trim())
                .bind(input.last_name.trim())
                .bind(email)
                .bind(input.phone.as_deref())
                .bind(input.date_of_birth)
                .bind(input.guardian_name.as_deref())
                .bind(input.guardian_phone.as_deref())
                .fetch_one(&pool)
                .await
            })
            .await
    }

    pub async fn update(&self, id: Uuid, input: &UpdateStudent) -> Result<Student, DatabaseError> {
        let email = input.email.as_deref().map(|e| e.trim().to_lowercase());
        let email = email.as_deref();
        self.db
            .run("students.update", |pool| async move {
                sqlx::query_as::<_, Student>(&format!(
                    "UPDATE students SET
                        user_id = COALESCE($2, user_id),
                        branch_id = COALESCE($3, branch_id),
                        first_name = COALESCE($4, first_name),
                        last_name = COALESCE($5, last_name),
                        email = COALESCE($6, email),
                        phone = COALESCE($7, phone),
                        date_of_birth = COALESCE($8, date_of_birth),
                        guardian_name = COALESCE($9, guardian_name),
                        guardian_phone = COALESCE($10, guardian_phone),
                        updated_at = NOW()
                     WHERE id = $1
                     {RETURNING_STUDENT}"
                ))
                .bind(id)
                .bind(input.user_id)
                .bind(input.branch_id)
                .bind(input.first_name.as_deref().map(str::trim))
                .bind(input.last_name.as_deref().map(str::trim))
                .bind(email)
                .bind(input.phone.as_deref())
                .bind(input.date_of_birth)
                .bind(input.guardian_name.as_deref())
                .bind(input.guardian_phone.as_deref())
                .fetch_optional(&pool)
                .await
            })
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Student {} not found", id)))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DatabaseError> {
        let affected = self
            .db
            .run("students.delete", |pool| async move {
                sqlx::query("DELETE FROM students WHERE id = $1")
                    .bind(id)
                    .execute(&pool)
                    .await
                    .map(|result| result.rows_affected())
            })
            .await?;

        if affected == 0 {
            return Err(DatabaseError::NotFound(format!("Student {} not found", id)));
        }
        Ok(())
    }
}
