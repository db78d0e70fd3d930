//! HTTP transport used to reach the key server
//!
//! The key cache only needs "GET a URL and hand back status, headers and body".
//! [`ReqwestHttpClient`] is the production implementation; tests substitute
//! their own.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;

use crate::error::TransportError;

/// A response as seen by the key cache
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Header names are lower-cased
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Look up a header by case-insensitive name
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// `true` only for `200 OK`
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Capability to GET a URL
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Perform a GET request
    ///
    /// # Errors
    ///
    /// Returns an error if no response could be obtained at all. Non-200
    /// statuses are not errors at this level.
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError>;
}

/// [`HttpClient`] backed by `reqwest`
#[derive(Clone, Default)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Client whose requests give up after `timeout`
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying TLS backend cannot be initialized.
    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        debug!("🌐 GET {url}");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TransportError(format!("Request to {url} failed: {e}")))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_ascii_lowercase(), v.to_string()))
            })
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError(format!("Failed to read response body from {url}: {e}")))?
            .to_vec();

        debug!("🌐 GET {url} -> {status} ({} bytes)", body.len());
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
