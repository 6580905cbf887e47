//! Remote document store speaking the Realtime Database REST protocol.
//!
//! Records live under `{url}/users/{id}.json`. Reads of a missing path
//! return the JSON literal `null`; writes are whole-document `PUT`s.

use crate::error::StorageError;
use async_trait::async_trait;
use pinpoint_core::{Result, User, UserId, UserStore};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;
use url::Url;

const COLLECTION: &str = "users";

/// Connection settings for a [`RealtimeUserStore`]
#[derive(Debug, Clone)]
pub struct RealtimeConfig {
    /// Database root, e.g. `https://my-project-default-rtdb.firebaseio.com`
    pub url: String,

    /// Sent as the `auth` query parameter when present
    pub auth_token: Option<String>,

    pub timeout: Duration,
}

impl RealtimeConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            auth_token: None,
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// User store backed by a remote JSON document database
#[derive(Debug, Clone)]
pub struct RealtimeUserStore {
    http: Client,
    base_url: String,
    auth_token: Option<String>,
}

impl RealtimeUserStore {
    pub fn new(config: RealtimeConfig) -> std::result::Result<Self, StorageError> {
        let base_url = config.url.trim_end_matches('/').to_string();
        let parsed = Url::parse(&base_url).map_err(|e| StorageError::InvalidUrl(e.to_string()))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(StorageError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(format!("Pinpoint/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            auth_token: config.auth_token,
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/{}.json", self.base_url, COLLECTION)
    }

    fn document_url(&self, id: &UserId) -> String {
        format!("{}/{}/{}.json", self.base_url, COLLECTION, id)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth_token {
            Some(token) => request.query(&[("auth", token.as_str())]),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> std::result::Result<Response, StorageError> {
        let response = self.authorize(request).send().await?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(StorageError::ServerError {
                status: status.as_u16(),
                message,
            })
        }
    }

    async fn read<T: DeserializeOwned>(&self, url: &str) -> std::result::Result<Option<T>, StorageError> {
        debug!(url = %url, "Reading document");
        let body = self.send(self.http.get(url)).await?.text().await?;
        Ok(serde_json::from_str::<Option<T>>(&body)?)
    }
}

#[async_trait]
impl UserStore for RealtimeUserStore {
    async fn put(&self, id: &UserId, user: &User) -> Result<()> {
        let url = self.document_url(id);
        debug!(url = %url, "Writing document");
        self.send(self.http.put(&url).json(user)).await?;
        Ok(())
    }

    async fn get(&self, id: &UserId) -> Result<Option<User>> {
        Ok(self.read::<User>(&self.document_url(id)).await?)
    }

    async fn get_all(&self) -> Result<Vec<User>> {
        let users = self
            .read::<HashMap<String, User>>(&self.collection_url())
            .await?
            .unwrap_or_default();
        Ok(users.into_values().collect())
    }

    async fn remove(&self, id: &UserId) -> Result<()> {
        let url = self.document_url(id);
        debug!(url = %url, "Deleting document");
        self.send(self.http.delete(&url)).await?;
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        let request = self
            .http
            .get(self.collection_url())
            .query(&[("shallow", "true")]);
        self.send(request).await?;
        Ok(())
    }
}
