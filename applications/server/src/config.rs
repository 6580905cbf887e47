/// Server configuration
use crate::error::{Result, ServerError};
use pinpoint_geocode::{ResolverConfig, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Variables read when the prefixed ones are absent
const LEGACY_API_KEY: &str = "OPENWEATHER_API_KEY";
const LEGACY_BASE_URL: &str = "OPENWEATHER_BASE_URL";
const LEGACY_PORT: &str = "PORT";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_geocoding")]
    pub geocoding: GeocodingSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeocodingSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Used by the `sqlite` backend
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Root of the remote document database, used by the `realtime` backend
    #[serde(default)]
    pub realtime_url: Option<String>,

    #[serde(default)]
    pub auth_token: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    #[default]
    Sqlite,
    Realtime,
}

impl GeocodingSettings {
    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig::new(&self.base_url, &self.api_key)
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }
}

impl StorageSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl ServerConfig {
    /// Load configuration from file and environment
    ///
    /// `path` names a config file that must exist; without it `config.toml`
    /// in the working directory is read when present. `PINPOINT_*`
    /// variables override the file, and the legacy `OPENWEATHER_*` and
    /// `PORT` variables fill in whatever neither of them sets.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        settings = legacy_default(settings, "geocoding.api_key", LEGACY_API_KEY)?;
        settings = legacy_default(settings, "geocoding.base_url", LEGACY_BASE_URL)?;
        settings = legacy_default(settings, "server.port", LEGACY_PORT)?;

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let config_path = PathBuf::from("config.toml");
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        // Override with environment variables (PINPOINT_SECTION__KEY)
        settings = settings.add_source(
            config::Environment::with_prefix("PINPOINT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.geocoding.api_key.trim().is_empty() {
            return Err(ServerError::Config(format!(
                "OpenWeather API key is required (set PINPOINT_GEOCODING__API_KEY or {})",
                LEGACY_API_KEY
            )));
        }

        if self.geocoding.timeout_secs == 0 || self.storage.timeout_secs == 0 {
            return Err(ServerError::Config(
                "Timeouts must be at least one second".to_string(),
            ));
        }

        if self.storage.backend == StorageBackend::Realtime
            && self
                .storage
                .realtime_url
                .as_deref()
                .map_or(true, |url| url.trim().is_empty())
        {
            return Err(ServerError::Config(
                "Realtime storage requires a URL (set PINPOINT_STORAGE__REALTIME_URL)".to_string(),
            ));
        }

        Ok(())
    }
}

fn legacy_default(
    settings: config::ConfigBuilder<config::builder::DefaultState>,
    key: &str,
    variable: &str,
) -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
    match std::env::var(variable) {
        Ok(value) if !value.is_empty() => settings
            .set_default(key, value)
            .map_err(|e| ServerError::Config(e.to_string())),
        _ => Ok(settings),
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_geocoding() -> GeocodingSettings {
    GeocodingSettings {
        base_url: default_base_url(),
        api_key: String::new(),
        timeout_secs: default_timeout_secs(),
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        backend: StorageBackend::default(),
        database_url: default_database_url(),
        realtime_url: None,
        auth_token: None,
        timeout_secs: default_timeout_secs(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/pinpoint.db".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            geocoding: default_geocoding(),
            storage: default_storage(),
        }
    }
}
