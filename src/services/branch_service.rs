use uuid::Uuid;

use crate::database::models::{Branch, CreateBranch, UpdateBranch};
use crate::database::{Database, DatabaseError};

#[derive(Clone)]
pub struct BranchService {
    db: Database,
}

impl BranchService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn list(&self, school_id: Option<Uuid>) -> Result<Vec<Branch>, DatabaseError> {
        self.db
            .run("branches.list", |pool| async move {
                sqlx::query_as::<_, Branch>(
                    "SELECT id, school_id, name, address, phone, created_at, updated_at
                     FROM branches
                     WHERE ($1::uuid IS NULL OR school_id = $1)
                     ORDER BY name",
                )
                .bind(school_id)
                .fetch_all(&pool)
                .await
            })
            .await
    }

    pub async fn get(&self, id: Uuid) -> Result<Branch, DatabaseError> {
        self.db
            .run("branches.get", |pool| async move {
                sqlx::query_as::<_, Branch>(
                    "SELECT id, school_id, name, address, phone, created_at, updated_at
                     FROM branches WHERE id = $1",
                )
                .bind(id)
                .fetch_optional(&pool)
                .await
            })
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Branch {} not found", id)))
    }

    pub async fn create(&self, input: &CreateBranch) -> Result<Branch, DatabaseError> {
        self.db
            .run("branches.create", |pool| async move {
                sqlx::query_as::<_, Branch>(
                    "INSERT INTO branches (school_id, name, address, phone)
                     VALUES ($1, $2, $3, $4)
                     RETURNING id, school_id, name, address, phone, created_at, updated_at",
                )
                .bind(input.school_id)
                .bind(input.name.trim())
                .bind(input.address.as_deref())
                .bind(input.phone.as_deref())
                .fetch_one(&pool)
                .await
            })
            .await
    }

    pub async fn update(&self, id: Uuid, input: &UpdateBranch) -> Result<Branch, DatabaseError> {
        self.db
            .run("branches.update", |pool| async move {
                sqlx::query_as::<_, Branch>(
                    "UPDATE branches SET
                        school_id = COALESCE($2, school_id),
                        name = COALESCE($3, name),
                        address = COALESCE($4, address),
                        phone = COALESCE($5, phone),
                        updated_at = NOW()
                     WHERE id = $1
                     RETURNING id, school_id, name, address, phone, created_at, updated_at",
                )
                .bind(id)
                .bind(input.school_id)
                .bind(input.name.as_deref().map(str::trim))
                .bind(input.address.as_deref())
                .bind(input.phone.as_deref())
                .fetch_optional(&pool)
                .await
            })
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Branch {} not found", id)))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DatabaseError> {
        let affected = self
            .db
            .run("branches.delete", |pool| async move {
                sqlx::query("DELETE FROM branches WHERE id = $1")
                    .bind(id)
                    .execute(&pool)
                    .await
                    .map(|result| result.rows_affected())
            })
            .await?;

        if affected == 0 {
            return Err(DatabaseError::NotFound(format!("Branch {} not found", id)));
        }
        Ok(())
    }
}
