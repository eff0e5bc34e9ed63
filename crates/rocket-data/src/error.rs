//! Lookup error types.

use rocket_commerce::CartError;
use thiserror::Error;

/// Errors that can occur when talking to the lookup service.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Failed to build or send the request.
    #[error("Request failed: {0}")]
    Request(String),

    /// Could not reach the service.
    #[error("Connection error: {0}")]
    Connection(String),

    /// The request did not complete in time.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// HTTP error response.
    #[error("HTTP {status} for {url}")]
    Http { status: u16, url: String },

    /// Response body did not match the expected shape.
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// Fixture file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FetchError {
    /// HTTP status, if the service answered with one.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout(e.to_string())
        } else if e.is_connect() {
            FetchError::Connection(e.to_string())
        } else if e.is_decode() {
            FetchError::Deserialization(e.to_string())
        } else if let Some(status) = e.status() {
            FetchError::Http {
                status: status.as_u16(),
                url: e.url().map(|u| u.to_string()).unwrap_or_default(),
            }
        } else {
            FetchError::Request(e.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Deserialization(e.to_string())
    }
}

impl From<FetchError> for CartError {
    fn from(e: FetchError) -> Self {
        CartError::Lookup(e.to_string())
    }
}
