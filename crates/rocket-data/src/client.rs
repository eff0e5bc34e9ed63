//! JSON-over-HTTP client with a base URL.

use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::FetchError;

/// HTTP client for the lookup service.
///
/// Paths passed to `get_*` are resolved against the base URL, so
/// `client.get_json("products/1")` with base `http://localhost:3333`
/// requests `http://localhost:3333/products/1`.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: reqwest::Client,
    base_url: String,
}

impl FetchClient {
    /// Create a client with no request timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        Self::builder(base_url).build()
    }

    /// Start configuring a client.
    pub fn builder(base_url: impl Into<String>) -> FetchClientBuilder {
        FetchClientBuilder {
            base_url: base_url.into(),
            timeout: None,
        }
    }

    /// Base URL requests are resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve a path against the base URL.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// GET a JSON document. Any non-success status is an error.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = self.url(path);
        let response = self.http.get(&url).send().await?;
        Self::handle_response(url, response).await
    }

    /// GET a JSON document, mapping `404 Not Found` to `None`.
    pub async fn get_optional_json<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Option<T>, FetchError> {
        let url = self.url(path);
        let response = self.http.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!(%url, "lookup returned 404");
            return Ok(None);
        }
        Self::handle_response(url, response).await.map(Some)
    }

    async fn handle_response<T: DeserializeOwned>(
        url: String,
        response: reqwest::Response,
    ) -> Result<T, FetchError> {
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "lookup failed");
            return Err(FetchError::Http {
                status: status.as_u16(),
                url,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            FetchError::Deserialization(format!("{}: {}", url, e))
        })
    }
}

/// Builder for [`FetchClient`].
#[derive(Debug)]
pub struct FetchClientBuilder {
    base_url: String,
    timeout: Option<Duration>,
}

impl FetchClientBuilder {
    /// Abort requests that take longer than `timeout`.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<FetchClient, FetchError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(FetchError::Request(format!(
                "base URL must be http(s): {}",
                self.base_url
            )));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(FetchClient {
            http: builder.build()?,
            base_url: self.base_url,
        })
    }
}
