//! Storage-specific errors
use pinpoint_core::PinpointError;
use thiserror::Error;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP request to the document store failed
    #[error("HTTP request failed: {0}")]
    Request(reqwest::Error),

    /// Document store returned an error response
    #[error("Database server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Request exceeded its deadline
    #[error("Database request timed out")]
    Timeout,

    /// Invalid database URL
    #[error("Invalid database URL: {0}")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for StorageError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Request(err)
        }
    }
}

impl From<StorageError> for PinpointError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Timeout => PinpointError::timeout(err.to_string()),
            StorageError::Database(sqlx::Error::PoolTimedOut) => {
                PinpointError::timeout(err.to_string())
            }
            StorageError::InvalidUrl(_) => PinpointError::config(err.to_string()),
            other => PinpointError::storage(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinpoint_core::ErrorKind;

    #[test]
    fn timeouts_keep_their_kind() {
        let err: PinpointError = StorageError::Timeout.into();
        assert_eq!(err.kind(), ErrorKind::Timeout);

        let err: PinpointError = StorageError::Database(sqlx::Error::PoolTimedOut).into();
        assert_eq!(err.kind(), ErrorKind::Timeout);
    }

    #[test]
    fn server_errors_are_storage_failures() {
        let err: PinpointError = StorageError::ServerError {
            status: 503,
            message: "unavailable".into(),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::Storage);
        assert!(err.to_string().contains("503"));
    }
}
