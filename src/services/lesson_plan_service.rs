use uuid::Uuid;

use crate::database::models::{CreateLessonPlan, LessonPlan, UpdateLessonPlan};
use crate::database::{Database, DatabaseError};

const SELECT_LESSON_PLAN: &str = "SELECT p.id, p.teacher_id, p.class_id, p.title, p.content, p.objectives, p.lesson_date,
            p.created_at, p.updated_at, t.user_id AS owner_user_id
     FROM lesson_plans p
     JOIN teachers t ON t.id = p.teacher_id";

const RETURNING_LESSON_PLAN: &str = "SELECT w.id, w.teacher_id, w.class_id, w.title, w.content, w.objectives, w.lesson_date,
            w.created_at, w.updated_at, t.user_id AS owner_user_id
     FROM written w
     JOIN teachers t ON t.id = w.teacher_id";

#[derive(Clone)]
pub struct LessonPlanService {
    db: Database,
}

impl LessonPlanService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// All plans, or only those owned by `owner_user_id` when given.
    pub async fn list(
        &self,
        owner_user_id: Option<Uuid>,
        class_id: Option<Uuid>,
    ) -> Result<Vec<LessonPlan>, DatabaseError> {
        self.db
            .run("lesson_plans.list", |pool| async move {
                sqlx::query_as::<_, LessonPlan>(&format!(
                    "{SELECT_LESSON_PLAN}
                     WHERE ($1::uuid IS NULL OR t.user_id = $1)
                       AND ($2::uuid IS NULL OR p.class_id = $2)
                     ORDER BY p.lesson_date NULLS LAST, p.created_at"
                ))
                .bind(owner_user_id)
                .bind(class_id)
                .fetch_all(&pool)
                .await
            })
            .await
    }

    pub async fn get(&self, id: Uuid) -> Result<LessonPlan, DatabaseError> {
        self.db
            .run("lesson_plans.get", |pool| async move {
                sqlx::query_as::<_, LessonPlan>(&format!("{SELECT_LESSON_PLAN} WHERE p.id = $1"))
                    .bind(id)
                    .fetch_optional(&pool)
                    .await
            })
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Lesson plan {} not found", id)))
    }

    /// `teacher_id` is resolved by the caller; the input's own field is ignored.
    pub async fn create(&self, teacher_id: Uuid, input: &CreateLessonPlan) -> Result<LessonPlan, DatabaseError> {
        self.db
            .run("lesson_plans.create", |pool| async move {
                sqlx::query_as::<_, LessonPlan>(&format!(
                    "WITH written AS (
                        INSERT INTO lesson_plans (teacher_id, class_id, title, content, objectives, lesson_date)
                        VALUES ($1, $2, $3, $4, $5, $6)
                        RETURNING *
                     )
                     {RETURNING_LESSON_PLAN}"
                ))
                .bind(teacher_id)
                .bind(input.class_id)
                .bind(input.title.trim())
                .bind(input.content.as_deref())
                .bind(input.objectives.as_deref())
                .bind(input.lesson_date)
                .fetch_one(&pool)
                .await
            })
            .await
    }

    pub async fn update(&self, id: Uuid, input: &UpdateLessonPlan) -> Result<LessonPlan, DatabaseError> {
        self.db
            .run("lesson_plans.update", |pool| async move {
                sqlx::query_as::<_, LessonPlan>(&format!(
                    "WITH written AS (
                        UPDATE lesson_plans SET
                            class_id = COALESCE($2, class_id),
                            title = COALESCE($3, title),
                            content = COALESCE($4, content),
                            objectives = COALESCE($5, objectives),
                            lesson_date = COALESCE($6, lesson_date),
                            updated_at = NOW()
                        WHERE id = $1
                        RETURNING *
                     )
                     {RETURNING_LESSON_PLAN}"
                ))
                .bind(id)
                .bind(input.class_id)
                .bind(input.title.as_deref().map(str::trim))
                .bind(input.content.as_deref())
                .bind(input.objectives.as_deref())
                .bind(input.lesson_date)
                .fetch_optional(&pool)
                .await
            })
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Lesson plan {} not found", id)))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DatabaseError> {
        let affected = self
            .db
            .run("lesson_plans.delete", |pool| async move {
                sqlx::query("DELETE FROM lesson_plans WHERE id = $1")
                    .bind(id)
                    .execute(&pool)
                    .await
                    .map(|result| result.rows_affected())
            })
            .await?;

        if affected == 0 {
            return Err(DatabaseError::NotFound(format!("Lesson plan {} not found", id)));
        }
        Ok(())
    }
}
