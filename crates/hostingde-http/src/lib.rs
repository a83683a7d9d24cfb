// # hosting.de HTTP Transport
//
// reqwest implementation of the `Transport` trait from `hostingde-core`.
//
// The transport is single-shot: one POST per call, body returned as text
// whatever the HTTP status. The API reports failures inside the JSON
// envelope, so status classification and retries stay in `ApiClient`.
//
// ## Security Requirements
//
// - Request bodies carry the auth token and are NEVER logged here
// - Logging of bodies is gated by `ClientConfig::log_request_bodies` in the
//   core client, which redacts the token
//
// ## API Reference
//
// - hosting.de JSON API: https://www.hosting.de/api/?json
// - All DNS operations: POST `https://secure.hosting.de/api/dns/v1/json/<operation>`

use async_trait::async_trait;
use hostingde_core::traits::Transport;
use hostingde_core::{ApiClient, ClientConfig, Error, Result};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use std::sync::Arc;
use std::time::Duration;

/// Default HTTP timeout for API requests (10 seconds)
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!("hostingde-rs/", env!("CARGO_PKG_VERSION"));

/// reqwest-backed transport
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpTransport {
    /// Create a transport with the given request timeout
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, timeout })
    }

    /// Create a transport using the timeout of `config`
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::new(config.timeout())
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("timeout", &self.timeout)
            .field("user_agent", &USER_AGENT)
            .finish()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, uri: &str, body: String) -> Result<String> {
        let response = self
            .client
            .post(uri)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::transport(uri, format!("no response within {:?}", self.timeout))
                } else {
                    Error::transport(uri, format!("HTTP request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("{} answered HTTP {}", uri, status);
        } else {
            tracing::debug!("{} answered HTTP {}", uri, status);
        }

        let bytes = response.bytes().await.map_err(|e| {
            tracing::error!("Failed to read response body from {}: {}", uri, e);
            Error::malformed(uri, "")
        })?;

        String::from_utf8(bytes.to_vec())
            .map_err(|e| Error::malformed(uri, String::from_utf8_lossy(e.as_bytes())))
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

/// Build an [`ApiClient`] talking HTTP to `config.base_url`
pub fn connect(config: ClientConfig) -> Result<ApiClient> {
    let transport = HttpTransport::from_config(&config)?;
    ApiClient::new(config, Arc::new(transport))
}
