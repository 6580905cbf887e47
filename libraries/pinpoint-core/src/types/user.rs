//! User domain types
use super::{Location, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted user record
///
/// `latitude`, `longitude` and `timezone` are always derived from `zip_code`
/// by a location lookup; they are never taken from client input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier, immutable after creation
    pub id: UserId,

    /// Display name
    pub name: String,

    /// Postal code driving the location fields
    pub zip_code: String,

    pub latitude: f64,

    pub longitude: f64,

    /// `UTC±HH:MM`
    pub timezone: String,

    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,

    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Assemble a fresh record; both timestamps are set to `now`
    pub fn new(id: UserId, input: CreateUser, location: Location, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: input.name,
            zip_code: input.zip_code,
            latitude: location.latitude,
            longitude: location.longitude,
            timezone: location.timezone,
            created_at: now,
            updated_at: now,
        }
    }

    /// Location fields currently stored on the record
    pub fn location(&self) -> Location {
        Location::new(self.latitude, self.longitude, self.timezone.clone())
    }

    /// Overwrite all derived location fields at once
    pub fn set_location(&mut self, location: Location) {
        self.latitude = location.latitude;
        self.longitude = location.longitude;
        self.timezone = location.timezone;
    }
}

/// Validated input for creating a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub name: String,
    pub zip_code: String,
}

impl CreateUser {
    pub fn new(name: impl Into<String>, zip_code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            zip_code: zip_code.into(),
        }
    }
}

/// Validated partial update; only `Some` fields are applied
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    pub name: Option<String>,
    pub zip_code: Option<String>,
}

/// Every stored user plus the count
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserList {
    pub users: Vec<User>,
    pub count: usize,
}

impl From<Vec<User>> for UserList {
    fn from(users: Vec<User>) -> Self {
        let count = users.len();
        Self { users, count }
    }
}

/// RFC 3339 with millisecond precision and a `Z` suffix, e.g.
/// `2024-05-01T12:30:00.000Z`
mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_user() -> User {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        User::new(
            UserId::new("67e55044-10b1-426f-9247-bb680e5fe0c8"),
            CreateUser::new("Ana", "12345"),
            Location::new(40.1, -74.2, "UTC-05:00"),
            now,
        )
    }

    #[test]
    fn new_user_stamps_both_timestamps() {
        let user = sample_user();
        assert_eq!(user.created_at, user.updated_at);
        assert_eq!(user.timezone, "UTC-05:00");
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let value = serde_json::to_value(sample_user()).unwrap();
        assert_eq!(value["zipCode"], "12345");
        assert_eq!(value["createdAt"], "2024-05-01T12:30:00.000Z");
        assert_eq!(value["updatedAt"], "2024-05-01T12:30:00.000Z");
        assert_eq!(value["latitude"], 40.1);
    }

    #[test]
    fn set_location_replaces_all_derived_fields() {
        let mut user = sample_user();
        user.set_location(Location::new(34.05, -118.24, "UTC-08:00"));
        assert_eq!(user.location(), Location::new(34.05, -118.24, "UTC-08:00"));
    }

    #[test]
    fn user_list_counts_entries() {
        let list = UserList::from(vec![sample_user(), sample_user()]);
        assert_eq!(list.count, 2);
    }
}
