//! Pinpoint Storage
//!
//! `UserStore` backends for Pinpoint.
//!
//! # Backends
//!
//! - **Memory**: `HashMap` behind a `tokio` lock, for tests and throwaway runs
//! - **SQLite**: one JSON document per user in a pooled `SQLite` database
//! - **Realtime**: a remote JSON document database over REST
//!
//! All three store whole records and replace them atomically on `put`.
//!
//! # Example
//!
//! ```rust,no_run
//! use pinpoint_storage::{create_pool, run_migrations, SqliteUserStore};
//! use pinpoint_core::UserStore;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://pinpoint.db", Duration::from_secs(10)).await?;
//! run_migrations(&pool).await?;
//!
//! let store = SqliteUserStore::new(pool);
//! let users = store.get_all().await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod memory;
mod realtime;
mod sqlite;

pub use error::StorageError;
pub use memory::MemoryUserStore;
pub use realtime::{RealtimeConfig, RealtimeUserStore};
pub use sqlite::SqliteUserStore;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;
use std::time::Duration;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), StorageError> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `sqlite://pinpoint.db`)
/// * `timeout` - how long to wait for a connection or a lock
pub async fn create_pool(database_url: &str, timeout: Duration) -> Result<SqlitePool, StorageError> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(database_url, "Creating SQLite pool");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(timeout);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(timeout)
        .connect_with(options)
        .await?;

    tracing::info!("SQLite pool ready");

    Ok(pool)
}
