//! Core error types for Pinpoint
use thiserror::Error;

/// Result type alias using `PinpointError`
pub type Result<T> = std::result::Result<T, PinpointError>;

/// Root cause category of a [`PinpointError`]
///
/// Operation wrappers (`CreateFailed`, `UpdateFailed`, ...) are transparent
/// to this classification: [`PinpointError::kind`] reports the kind of the
/// innermost cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller-supplied data was rejected (e.g. unknown postal code)
    InvalidInput,
    /// An upstream dependency did not answer within its deadline
    Timeout,
    /// An upstream dependency failed for any other reason
    Upstream,
    /// The addressed record does not exist
    NotFound,
    /// The user store failed
    Storage,
    /// The process is misconfigured
    Config,
}

/// Core error type for Pinpoint
#[derive(Error, Debug)]
pub enum PinpointError {
    /// Invalid input
    #[error("{0}")]
    InvalidInput(String),

    /// Upstream deadline exceeded
    #[error("{0}")]
    Timeout(String),

    /// Upstream failure
    #[error("{0}")]
    Upstream(String),

    /// Entity not found
    #[error("{entity} not found")]
    NotFound { entity: String, id: String },

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to create user: {0}")]
    CreateFailed(#[source] Box<PinpointError>),

    #[error("Failed to fetch users: {0}")]
    FetchFailed(#[source] Box<PinpointError>),

    #[error("Failed to update user: {0}")]
    UpdateFailed(#[source] Box<PinpointError>),

    #[error("Failed to delete user: {0}")]
    DeleteFailed(#[source] Box<PinpointError>),
}

impl PinpointError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a timeout error
    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::Timeout(msg.into())
    }

    /// Create an upstream error
    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn create_failed(cause: Self) -> Self {
        Self::CreateFailed(Box::new(cause))
    }

    pub fn fetch_failed(cause: Self) -> Self {
        Self::FetchFailed(Box::new(cause))
    }

    pub fn update_failed(cause: Self) -> Self {
        Self::UpdateFailed(Box::new(cause))
    }

    pub fn delete_failed(cause: Self) -> Self {
        Self::DeleteFailed(Box::new(cause))
    }

    /// Kind of the root cause, looking through operation wrappers
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::Timeout(_) => ErrorKind::Timeout,
            Self::Upstream(_) => ErrorKind::Upstream,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Storage(_) => ErrorKind::Storage,
            Self::Config(_) => ErrorKind::Config,
            Self::CreateFailed(cause)
            | Self::FetchFailed(cause)
            | Self::UpdateFailed(cause)
            | Self::DeleteFailed(cause) => cause.kind(),
        }
    }
}

/// Failure of a single location lookup
///
/// Closed set so callers can tell user error from infrastructure error
/// without inspecting messages.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The provider does not know the postal code
    #[error("Invalid zip code provided")]
    InvalidZipCode(String),

    /// The provider did not answer within the configured deadline
    #[error("Weather service timeout - please try again")]
    Timeout,

    /// Transport, status or decoding failure
    #[error("Failed to fetch location data: {0}")]
    Upstream(String),
}

impl From<ResolveError> for PinpointError {
    fn from(err: ResolveError) -> Self {
        let message = err.to_string();
        match err {
            ResolveError::InvalidZipCode(_) => Self::InvalidInput(message),
            ResolveError::Timeout => Self::Timeout(message),
            ResolveError::Upstream(_) => Self::Upstream(message),
        }
    }
}
