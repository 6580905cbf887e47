/// Shared application state
use crate::config::{ServerConfig, StorageBackend, StorageSettings};
use crate::error::{Result, ServerError};
use pinpoint_core::{LocationResolver, UserService, UserStore};
use pinpoint_geocode::OpenWeatherResolver;
use pinpoint_storage::{
    create_pool, run_migrations, MemoryUserStore, RealtimeConfig, RealtimeUserStore,
    SqliteUserStore,
};
use std::path::Path;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserService>,
}

impl AppState {
    pub fn new(users: UserService) -> Self {
        Self {
            users: Arc::new(users),
        }
    }

    /// Wire the configured store and resolver into a service
    pub async fn from_config(config: &ServerConfig) -> Result<Self> {
        let store = open_store(&config.storage).await?;
        let resolver = open_resolver(config)?;
        Ok(Self::new(UserService::new(store, resolver)))
    }
}

pub fn open_resolver(config: &ServerConfig) -> Result<Arc<dyn LocationResolver>> {
    let resolver = OpenWeatherResolver::new(config.geocoding.resolver_config())?;
    tracing::info!(endpoint = resolver.endpoint(), "Location resolver ready");
    Ok(Arc::new(resolver))
}

/// Open the configured store backend, migrating `SQLite` databases first
pub async fn open_store(settings: &StorageSettings) -> Result<Arc<dyn UserStore>> {
    match settings.backend {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; records are lost on exit");
            Ok(Arc::new(MemoryUserStore::new()))
        }
        StorageBackend::Sqlite => {
            ensure_database_dir(&settings.database_url).await?;
            let pool = create_pool(&settings.database_url, settings.timeout()).await?;
            run_migrations(&pool).await?;
            tracing::info!("Database connected");
            Ok(Arc::new(SqliteUserStore::new(pool)))
        }
        StorageBackend::Realtime => {
            let url = settings.realtime_url.clone().ok_or_else(|| {
                ServerError::Config("Realtime storage requires a URL".to_string())
            })?;

            let mut realtime = RealtimeConfig::new(url).with_timeout(settings.timeout());
            if let Some(token) = &settings.auth_token {
                realtime = realtime.with_auth_token(token);
            }

            let store = RealtimeUserStore::new(realtime)?;
            tracing::info!("Realtime database store ready");
            Ok(Arc::new(store))
        }
    }
}

// `create_if_missing` creates the file but not its directory
async fn ensure_database_dir(database_url: &str) -> Result<()> {
    let parent = database_url
        .strip_prefix("sqlite://")
        .map(|rest| rest.split('?').next().unwrap_or(rest))
        .and_then(|path| Path::new(path).parent());

    match parent {
        Some(dir) if !dir.as_os_str().is_empty() => tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| ServerError::Config(format!("Cannot create {}: {}", dir.display(), e))),
        _ => Ok(()),
    }
}
