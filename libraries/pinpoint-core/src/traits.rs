//! Core traits for Pinpoint
use crate::error::{ResolveError, Result};
use crate::types::{Location, User, UserId};
use async_trait::async_trait;

/// Keyed persistence for user records
///
/// Implementers store one whole record per key. `put` replaces the previous
/// value atomically; merging partial updates is the caller's job.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Store `user` under `id`, replacing any previous record
    async fn put(&self, id: &UserId, user: &User) -> Result<()>;

    /// Get the record stored under `id`
    ///
    /// A missing key is `Ok(None)`, not an error.
    async fn get(&self, id: &UserId) -> Result<Option<User>>;

    /// Get every stored record, in no particular order
    async fn get_all(&self) -> Result<Vec<User>>;

    /// Remove the record stored under `id`; a missing key is a no-op
    async fn remove(&self, id: &UserId) -> Result<()>;

    /// Check that the backend is reachable
    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

/// Postal code to coordinates and UTC offset
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LocationResolver: Send + Sync {
    /// Look up `zip_code` with a single upstream call
    async fn resolve(&self, zip_code: &str) -> std::result::Result<Location, ResolveError>;
}
