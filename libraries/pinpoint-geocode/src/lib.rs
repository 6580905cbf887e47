//! Pinpoint Geocode
//!
//! Postal code lookups against the OpenWeather API.
//!
//! The provider answers with coordinates and a timezone offset in seconds;
//! this crate normalizes that into a [`pinpoint_core::Location`] whose
//! timezone reads `UTC±HH:MM`.
//!
//! # Error mapping
//!
//! - provider 404 → `ResolveError::InvalidZipCode`
//! - deadline exceeded → `ResolveError::Timeout`
//! - anything else → `ResolveError::Upstream`

mod client;
mod timezone;
mod types;

pub use client::OpenWeatherResolver;
pub use timezone::format_utc_offset;
pub use types::{ResolverConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
