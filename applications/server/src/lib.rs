//! Pinpoint Server Library
//!
//! HTTP API for user records enriched with coordinates and a UTC offset
//! resolved from the user's postal code.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod state;
pub mod validation;

// Re-export commonly used types for convenience
pub use api::router;
pub use config::{ServerConfig, StorageBackend};
pub use error::{Result, ServerError};
pub use state::AppState;
