//! In-process user store.

use async_trait::async_trait;
use pinpoint_core::{Result, User, UserId, UserStore};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// `HashMap`-backed store for tests and ephemeral runs
///
/// Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<UserId, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn put(&self, id: &UserId, user: &User) -> Result<()> {
        self.users.write().await.insert(id.clone(), user.clone());
        Ok(())
    }

    async fn get(&self, id: &UserId) -> Result<Option<User>> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<User>> {
        Ok(self.users.read().await.values().cloned().collect())
    }

    async fn remove(&self, id: &UserId) -> Result<()> {
        self.users.write().await.remove(id);
        Ok(())
    }
}
