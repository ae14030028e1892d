use uuid::Uuid;

use crate::database::models::{Message, SendMessage};
use crate::database::{Database, DatabaseError};

const SELECT_MESSAGE: &str = "SELECT id, sender_id, recipient_id, subject, body, read_at, created_at FROM messages";

#[derive(Clone)]
pub struct MessageService {
    db: Database,
}

impl MessageService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Inbox and sent items of one user, newest first.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Message>, DatabaseError> {
        self.db
            .run("messages.list_for_user", |pool| async move {
                sqlx::query_as::<_, Message>(&format!(
                    "{SELECT_MESSAGE} WHERE sender_id = $1 OR recipient_id = $1 ORDER BY created_at DESC"
                ))
                .bind(user_id)
                .fetch_all(&pool)
                .await
            })
            .await
    }

    pub async fn list_all(&self) -> Result<Vec<Message>, DatabaseError> {
        self.db
            .run("messages.list_all", |pool| async move {
                sqlx::query_as::<_, Message>(&format!("{SELECT_MESSAGE} ORDER BY created_at DESC"))
                    .fetch_all(&pool)
                    .await
            })
            .await
    }

    pub async fn get(&self, id: Uuid) -> Result<Message, DatabaseError> {
        self.db
            .run("messages.get", |pool| async move {
                sqlx::query_as::<_, Message>(&format!("{SELECT_MESSAGE} WHERE id = $1"))
                    .bind(id)
                    .fetch_optional(&pool)
                    .await
            })
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Message {} not found", id)))
    }

    pub async fn send(&self, sender_id: Uuid, input: &SendMessage) -> Result<Message, DatabaseError> {
        self.db
            .run("messages.send", |pool| async move {
                sqlx::query_as::<_, Message>(
                    "INSERT INTO messages (sender_id, recipient_id, subject, body)
                     VALUES ($1, $2, $3, $4)
                     RETURNING id, sender_id, recipient_id, subject, body, read_at, created_at",
                )
                .bind(sender_id)
                .bind(input.recipient_id)
                .bind(input.subject.as_deref())
                .bind(&input.body)
                .fetch_one(&pool)
                .await
            })
            .await
    }

    /// Marking twice keeps the first read time.
    pub async fn mark_read(&self, id: Uuid) -> Result<Message, DatabaseError> {
        self.db
            .run("messages.mark_read", |pool| async move {
                sqlx::query_as::<_, Message>(
                    "UPDATE messages SET read_at = COALESCE(read_at, NOW()) WHERE id = $1
                     RETURNING id, sender_id, recipient_id, subject, body, read_at, created_at",
                )
                .bind(id)
                .fetch_optional(&pool)
                .await
            })
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Message {} not found", id)))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DatabaseError> {
        let affected = self
            .db
            .run("messages.delete", |pool| async move {
                sqlx::query("DELETE FROM messages WHERE id = $1")
                    .bind(id)
                    .execute(&pool)
                    .await
                    .map(|result| result.rows_affected())
            })
            .await?;

        if affected == 0 {
            return Err(DatabaseError::NotFound(format!("Message {} not found", id)));
        }
        Ok(())
    }
}
