use uuid::Uuid;

use crate::database::models::{CreateSchool, School, UpdateSchool};
use crate::database::{Database, DatabaseError};

#[derive(Clone)]
pub struct SchoolService {
    db: Database,
}

impl SchoolService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> Result<Vec<School>, DatabaseError> {
        self.db
            .run("schools.list", |pool| async move {
                sqlx::query_as::<_, School>(
                    "SELECT id, name, address, phone, email, created_at, updated_at FROM schools ORDER BY name",
                )
                .fetch_all(&pool)
                .await
            })
            .await
    }

    pub async fn get(&self, id: Uuid) -> Result<School, DatabaseError> {
        self.db
            .run("schools.get", |pool| async move {
                sqlx::query_as::<_, School>(
                    "SELECT id, name, address, phone, email, created_at, updated_at FROM schools WHERE id = $1",
                )
                .bind(id)
                .fetch_optional(&pool)
                .await
            })
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("School {} not found", id)))
    }

    pub async fn create(&self, input: &CreateSchool) -> Result<School, DatabaseError> {
        self.db
            .run("schools.create", |pool| async move {
                sqlx::query_as::<_, School>(
                    "INSERT INTO schools (name, address, phone, email)
                     VALUES ($1, $2, $3, $4)
                     RETURNING id, name, address, phone, email, created_at, updated_at",
                )
                .bind(input.name.trim())
                .bind(input.address.as_deref())
                .bind(input.phone.as_deref())
                .bind(input.email.as_deref())
                .fetch_one(&pool)
                .await
            })
            .await
    }

    pub async fn update(&self, id: Uuid, input: &UpdateSchool) -> Result<School, DatabaseError> {
        self.db
            .run("schools.update", |pool| async move {
                sqlx::query_as::<_, School>(
                    "UPDATE schools SET
                        name = COALESCE($2, name),
                        address = COALESCE($3, address),
                        phone = COALESCE($4, phone),
                        email = COALESCE($5, email),
                        updated_at = NOW()
                     WHERE id = $1
                     RETURNING id, name, address, phone, email, created_at, updated_at",
                )
                .bind(id)
                .bind(input.name.as_deref().map(str::trim))
                .bind(input.address.as_deref())
                .bind(input.phone.as_deref())
                .bind(input.email.as_deref())
                .fetch_optional(&pool)
                .await
            })
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("School {} not found", id)))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DatabaseError> {
        let affected = self
            .db
            .run("schools.delete", |pool| async move {
                sqlx::query("DELETE FROM schools WHERE id = $1")
                    .bind(id)
                    .execute(&pool)
                    .await
                    .map(|result| result.rows_affected())
            })
            .await?;

        if affected == 0 {
            return Err(DatabaseError::NotFound(format!("School {} not found", id)));
        }
        Ok(())
    }
}
