//! Shared fixtures for storage integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use pinpoint_core::{CreateUser, Location, LocationResolver, ResolveError, User, UserId, UserStore};
use pinpoint_storage::{create_pool, run_migrations, SqliteUserStore};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tempfile::TempDir;

/// Build a record as the service would
pub fn sample_user(name: &str, zip_code: &str) -> User {
    User::new(
        UserId::generate(),
        CreateUser::new(name, zip_code),
        Location::new(40.1, -74.2, "UTC-05:00"),
        Utc::now().trunc_subsecs(3),
    )
}

/// SQLite store on a real file that is removed on drop
pub struct TestDb {
    pub store: SqliteUserStore,
    _temp_dir: TempDir,
}

impl TestDb {
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_url = format!("sqlite://{}", temp_dir.path().join("test.db").display());

        let pool = create_pool(&db_url, Duration::from_secs(5))
            .await
            .expect("Failed to create pool");
        run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        Self {
            store: SqliteUserStore::new(pool),
            _temp_dir: temp_dir,
        }
    }
}

/// Store contract every backend must honour
pub async fn exercise_store(store: &dyn UserStore) {
    assert!(store.get_all().await.unwrap().is_empty());

    let ana = sample_user("Ana", "12345");
    let bo = sample_user("Bo", "90001");
    store.put(&ana.id, &ana).await.unwrap();
    store.put(&bo.id, &bo).await.unwrap();

    assert_eq!(store.get(&ana.id).await.unwrap(), Some(ana.clone()));
    assert_eq!(store.get_all().await.unwrap().len(), 2);

    // put replaces the whole record
    let mut renamed = ana.clone();
    renamed.name = "Ana B".to_string();
    store.put(&renamed.id, &renamed).await.unwrap();
    assert_eq!(store.get(&ana.id).await.unwrap(), Some(renamed));
    assert_eq!(store.get_all().await.unwrap().len(), 2);

    store.remove(&ana.id).await.unwrap();
    assert_eq!(store.get(&ana.id).await.unwrap(), None);

    // removing twice is a no-op
    store.remove(&ana.id).await.unwrap();

    let remaining = store.get_all().await.unwrap();
    assert_eq!(remaining, vec![bo]);

    assert_eq!(store.get(&UserId::generate()).await.unwrap(), None);
}

/// Resolver with a fixed table of answers that counts its calls
#[derive(Default)]
pub struct TableResolver {
    answers: HashMap<String, Location>,
    calls: AtomicUsize,
}

impl TableResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, zip_code: &str, location: Location) -> Self {
        self.answers.insert(zip_code.to_string(), location);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LocationResolver for TableResolver {
    async fn resolve(&self, zip_code: &str) -> Result<Location, ResolveError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answers
            .get(zip_code)
            .cloned()
            .ok_or_else(|| ResolveError::InvalidZipCode(zip_code.to_string()))
    }
}
