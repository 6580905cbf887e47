//! OpenWeather-backed location resolver.

use crate::timezone::format_utc_offset;
use crate::types::{ResolverConfig, WeatherResponse};
use async_trait::async_trait;
use pinpoint_core::{Location, LocationResolver, PinpointError, ResolveError};
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};
use url::Url;

/// Resolves postal codes through the OpenWeather current-weather endpoint.
///
/// Each lookup is a single `GET {base_url}/weather?zip=..&appid=..` bounded by
/// the configured timeout. Failures are never retried.
///
/// # Example
///
/// ```ignore
/// use pinpoint_geocode::{OpenWeatherResolver, ResolverConfig};
/// use pinpoint_core::LocationResolver;
///
/// let config = ResolverConfig::new("https://api.openweathermap.org/data/2.5", "key");
/// let resolver = OpenWeatherResolver::new(config)?;
/// let location = resolver.resolve("10001").await?;
/// println!("{}, {} ({})", location.latitude, location.longitude, location.timezone);
/// ```
#[derive(Debug, Clone)]
pub struct OpenWeatherResolver {
    http: Client,
    endpoint: String,
    api_key: String,
}

impl OpenWeatherResolver {
    /// Create a resolver, validating the configuration.
    pub fn new(config: ResolverConfig) -> pinpoint_core::Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(PinpointError::config("OpenWeather API key is required"));
        }

        let base_url = config.base_url.trim_end_matches('/').to_string();
        let parsed = Url::parse(&base_url)
            .map_err(|e| PinpointError::config(format!("Invalid geocoding URL: {}", e)))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(PinpointError::config(
                "Geocoding URL must start with http:// or https://",
            ));
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(format!("Pinpoint/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PinpointError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            endpoint: format!("{}/weather", base_url),
            api_key: config.api_key,
        })
    }

    /// Full URL of the lookup endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl LocationResolver for OpenWeatherResolver {
    async fn resolve(&self, zip_code: &str) -> Result<Location, ResolveError> {
        debug!(url = %self.endpoint, zip_code, "Resolving location");

        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("zip", zip_code), ("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!(zip_code, "Provider does not know zip code");
            return Err(ResolveError::InvalidZipCode(zip_code.to_string()));
        }
        if !status.is_success() {
            warn!(status = %status, zip_code, "Location lookup rejected");
            return Err(ResolveError::Upstream(format!(
                "Request failed with status code {}",
                status.as_u16()
            )));
        }

        let body = response.text().await.map_err(classify)?;
        let payload: WeatherResponse = serde_json::from_str(&body)
            .map_err(|e| ResolveError::Upstream(format!("Malformed provider response: {}", e)))?;

        let location = Location::new(
            payload.coord.lat,
            payload.coord.lon,
            format_utc_offset(payload.timezone),
        );

        debug!(
            zip_code,
            place = payload.name.as_deref().unwrap_or("unknown"),
            timezone = %location.timezone,
            "Resolved location"
        );

        Ok(location)
    }
}

fn classify(err: reqwest::Error) -> ResolveError {
    if err.is_timeout() {
        warn!("Location lookup timed out");
        ResolveError::Timeout
    } else {
        ResolveError::Upstream(err.to_string())
    }
}
