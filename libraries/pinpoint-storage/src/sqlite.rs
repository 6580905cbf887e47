//! `SQLite` user store
//!
//! Each user is kept as one JSON document in the `users` table, keyed by id.
//! `put` is a single upsert statement, so readers never see a partially
//! written record.

use crate::error::StorageError;
use async_trait::async_trait;
use pinpoint_core::{Result, User, UserId, UserStore};
use sqlx::{Row, SqlitePool};

/// User store backed by a `SQLite` pool
#[derive(Debug, Clone)]
pub struct SqliteUserStore {
    pool: SqlitePool,
}

impl SqliteUserStore {
    /// Wrap a pool that already has migrations applied
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn decode(document: &str) -> std::result::Result<User, StorageError> {
    Ok(serde_json::from_str(document)?)
}

#[async_trait]
impl UserStore for SqliteUserStore {
    async fn put(&self, id: &UserId, user: &User) -> Result<()> {
        let document = serde_json::to_string(user).map_err(StorageError::from)?;

        sqlx::query(
            "INSERT INTO users (id, document, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(id)
             DO UPDATE SET document = excluded.document, updated_at = excluded.updated_at",
        )
        .bind(id.as_str())
        .bind(&document)
        .bind(user.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(StorageError::from)?;

        Ok(())
    }

    async fn get(&self, id: &UserId) -> Result<Option<User>> {
        let row = sqlx::query("SELECT document FROM users WHERE id = ?")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        match row {
            Some(row) => Ok(Some(decode(&row.get::<String, _>("document"))?)),
            None => Ok(None),
        }
    }

    async fn get_all(&self) -> Result<Vec<User>> {
        let rows = sqlx::query("SELECT document FROM users")
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        rows.iter()
            .map(|row| decode(&row.get::<String, _>("document")).map_err(Into::into))
            .collect()
    }

    async fn remove(&self, id: &UserId) -> Result<()> {
        sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(())
    }
}
