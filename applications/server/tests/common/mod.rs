//! Common test utilities and fixtures
#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use pinpoint_core::{Location, LocationResolver, ResolveError, UserService};
use pinpoint_server::{api, AppState};
use pinpoint_storage::MemoryUserStore;
use serde_json::Value;
use std::sync::Arc;
use tower::util::ServiceExt;

/// Postal codes with fixed answers
pub mod fixtures {
    pub const NEWARK_ZIP: &str = "07102";
    pub const BEVERLY_HILLS_ZIP: &str = "90210";
    /// Rejected as unknown by the resolver
    pub const UNKNOWN_ZIP: &str = "00000";
    /// Resolver times out
    pub const SLOW_ZIP: &str = "99999";
    /// Resolver fails upstream
    pub const BROKEN_ZIP: &str = "88888";
}

/// Resolver answering from [`fixtures`] without network access
pub struct StubResolver;

#[async_trait]
impl LocationResolver for StubResolver {
    async fn resolve(&self, zip_code: &str) -> Result<Location, ResolveError> {
        match zip_code {
            fixtures::NEWARK_ZIP => Ok(Location::new(40.7357, -74.1724, "UTC-05:00")),
            fixtures::BEVERLY_HILLS_ZIP => Ok(Location::new(34.0901, -118.4065, "UTC-08:00")),
            fixtures::SLOW_ZIP => Err(ResolveError::Timeout),
            fixtures::BROKEN_ZIP => Err(ResolveError::Upstream(
                "Request failed with status code 500".to_string(),
            )),
            other => Err(ResolveError::InvalidZipCode(other.to_string())),
        }
    }
}

/// Router over an in-memory store and the stub resolver
pub fn create_test_app() -> Router {
    let service = UserService::new(Arc::new(MemoryUserStore::new()), Arc::new(StubResolver));
    api::router(AppState::new(service))
}

/// Send a request and decode the JSON response
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    send_request(app, request.body(body).unwrap()).await
}

pub async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}
