use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

use super::manager::DatabaseError;
use super::models::User;

/// Lookup the authentication gate performs after a token verifies.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    async fn find_user(&self, id: Uuid) -> Result<Option<User>, DatabaseError>;
}

/// Map-backed store for running the gates without Postgres.
#[derive(Default)]
pub struct MemoryIdentityStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, user: User) {
        if let Ok(mut users) = self.users.write() {
            users.insert(user.id, user);
        }
    }

    pub fn remove(&self, id: Uuid) -> Option<User> {
        self.users.write().ok().and_then(|mut users| users.remove(&id))
    }
}

#[async_trait]
impl IdentityStore for MemoryIdentityStore {
    async fn find_user(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        let users = self
            .users
            .read()
            .map_err(|_| DatabaseError::Unavailable("identity store lock poisoned".to_string()))?;
        Ok(users.get(&id).cloned())
    }
}
