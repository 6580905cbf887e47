//! Resolver configuration and provider payloads.

use serde::Deserialize;
use std::time::Duration;

/// Default OpenWeather API root
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Default upper bound for a single lookup
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Resolver connection settings
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// API root; `/weather` is appended per request
    pub base_url: String,

    /// Credential sent as the `appid` query parameter
    pub api_key: String,

    /// Deadline for the whole request
    pub timeout: Duration,
}

impl ResolverConfig {
    /// Create a configuration with the default timeout.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the request deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Subset of the current-weather response we read
#[derive(Debug, Deserialize)]
pub(crate) struct WeatherResponse {
    pub coord: Coordinates,

    /// Seconds east of UTC
    pub timezone: i64,

    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}
