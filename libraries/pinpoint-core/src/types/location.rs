//! Location domain type
use serde::{Deserialize, Serialize};

/// Geographic position and UTC offset resolved for a postal code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Decimal degrees
    pub latitude: f64,

    /// Decimal degrees
    pub longitude: f64,

    /// Offset string of the form `UTC±HH:MM`
    pub timezone: String,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64, timezone: impl Into<String>) -> Self {
        Self {
            latitude,
            longitude,
            timezone: timezone.into(),
        }
    }
}
