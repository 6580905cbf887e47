/// Server error types
use crate::validation::FieldError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pinpoint_core::{ErrorKind, PinpointError};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    /// Request rejected before reaching the service
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error(transparent)]
    Core(#[from] PinpointError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<pinpoint_storage::StorageError> for ServerError {
    fn from(err: pinpoint_storage::StorageError) -> Self {
        ServerError::Core(err.into())
    }
}

/// Transport status for a service failure
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Timeout => StatusCode::GATEWAY_TIMEOUT,
        ErrorKind::Upstream => StatusCode::BAD_GATEWAY,
        ErrorKind::Storage | ErrorKind::Config => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ServerError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "success": false,
                    "message": "Validation failed",
                    "errors": errors,
                }),
            ),
            ServerError::Core(ref e) => {
                let status = status_for(e.kind());
                if status.is_server_error() {
                    tracing::error!(error = %e, "Request failed");
                } else {
                    tracing::warn!(error = %e, "Request rejected");
                }
                (
                    status,
                    json!({
                        "success": false,
                        "message": e.to_string(),
                    }),
                )
            }
            ServerError::Config(ref msg) => {
                tracing::error!("Config error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "success": false,
                        "message": "Configuration error",
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
