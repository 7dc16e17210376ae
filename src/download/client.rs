//! HTTP client wrapper shared by the catalog fetcher and downloaders.
//!
//! Created once per run and reused for every request, taking advantage of
//! connection pooling. All responses are status-checked before the body
//! is touched.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::user_agent;

use super::error::HttpError;

/// Default HTTP connect timeout (30 seconds).
const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default HTTP read timeout (5 minutes for large files).
const READ_TIMEOUT_SECS: u64 = 300;

/// HTTP client for portal requests.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    /// Creates a new client with default timeouts.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        Self::new_with_timeouts(CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS)
    }

    /// Creates a new client with explicit timeout values.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails with the supplied
    /// configuration.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new_with_timeouts(connect_timeout_secs: u64, read_timeout_secs: u64) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .timeout(Duration::from_secs(read_timeout_secs))
            .gzip(true)
            .user_agent(user_agent::default_user_agent())
            .build()
            .expect("failed to build HTTP client with static configuration");
        Self { client }
    }

    /// Issues a GET request and returns the status-checked response.
    pub(crate) async fn get(&self, url: &str) -> Result<reqwest::Response, HttpError> {
        debug!(url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| HttpError::from_request(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HttpError::status(url, status.as_u16()));
        }
        Ok(response)
    }

    /// Issues a GET request and parses the body as JSON.
    pub(crate) async fn get_json(&self, url: &str) -> Result<Value, HttpError> {
        let response = self.get(url).await?;
        response.json::<Value>().await.map_err(|e| {
            if e.is_decode() {
                HttpError::body(url, e.to_string())
            } else {
                HttpError::from_request(url, e)
            }
        })
    }
}
