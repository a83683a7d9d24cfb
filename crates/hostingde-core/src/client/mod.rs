//! hosting.de API client
//!
//! [`ApiClient`] owns the configuration, the transport and the cancellation
//! token. Every call goes through the same cycle:
//!
//! 1. fill unset auth fields from the configured credentials
//! 2. POST the JSON body through the [`Transport`]
//! 3. decode the envelope and classify its status
//! 4. resubmit while the API reports the resource as blocked
//! 5. reject any status other than success or pending
//!
//! Zone and record operations live in [`ZoneOperations`] and
//! [`RecordOperations`].

mod records;
mod zones;

pub use records::{RecordOperations, reconcile};
pub use zones::ZoneOperations;

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::model::{Endpoint, Envelope, Filter, FindParams, FindResult, Request};
use crate::retry::{Attempt, retry_blocked};
use crate::status::{Outcome, classify};
use crate::traits::Transport;

/// Client for the hosting.de DNS API
///
/// Cheap to clone; clones share configuration, transport and cancellation
/// token.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<Inner>,
}

struct Inner {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
    cancel: CancellationToken,
}

impl ApiClient {
    /// Create a client after validating `config`
    pub fn new(config: ClientConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        config.validate()?;

        debug!(
            "Created hosting.de client for {} using {} transport",
            config.base_url,
            transport.name()
        );

        Ok(Self {
            inner: Arc::new(Inner {
                config,
                transport,
                cancel: CancellationToken::new(),
            }),
        })
    }

    /// Use `cancel` to abort retry waits
    pub fn with_cancellation(self, cancel: CancellationToken) -> Self {
        Self {
            inner: Arc::new(Inner {
                config: self.inner.config.clone(),
                transport: self.inner.transport.clone(),
                cancel,
            }),
        }
    }

    /// Client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Token that aborts pending retry waits when cancelled
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.inner.cancel
    }

    /// Zone operations
    pub fn zones(&self) -> ZoneOperations<'_> {
        ZoneOperations::new(self)
    }

    /// Record operations
    pub fn records(&self) -> RecordOperations<'_> {
        RecordOperations::new(self)
    }

    /// Full URI of `endpoint`
    pub fn uri(&self, endpoint: Endpoint) -> String {
        endpoint.uri(&self.inner.config.base_url)
    }

    /// Send a request and return the accepted envelope
    ///
    /// # Errors
    ///
    /// - [`Error::MaxRetriesExceeded`] if the resource stayed blocked
    /// - [`Error::RemoteFailed`] for any other status than success or pending
    /// - transport and decode failures as they occur
    pub async fn send<P, T>(&self, endpoint: Endpoint, request: Request<P>) -> Result<Envelope<T>>
    where
        P: Serialize,
        T: DeserializeOwned + Default,
    {
        let (envelope, _) = self.exchange(endpoint, request).await?;
        Ok(envelope)
    }

    /// Find entities; an empty result is [`Error::NotFound`]
    pub(crate) async fn find<T>(&self, endpoint: Endpoint, params: FindParams) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let (envelope, body) = self
            .exchange::<_, FindResult<T>>(endpoint, Request::new(params))
            .await?;

        if envelope.response.data.is_empty() {
            return Err(Error::NotFound {
                uri: self.uri(endpoint),
                body,
            });
        }

        Ok(envelope.response.data)
    }

    /// First entity matching `filter`; none is [`Error::NotFound`]
    pub(crate) async fn find_one<T>(&self, endpoint: Endpoint, filter: Filter) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let (envelope, body) = self
            .exchange::<_, FindResult<T>>(endpoint, Request::new(FindParams::single(filter)))
            .await?;

        envelope
            .response
            .data
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound {
                uri: self.uri(endpoint),
                body,
            })
    }

    /// Send a request and return the accepted envelope with its raw body
    async fn exchange<P, T>(
        &self,
        endpoint: Endpoint,
        mut request: Request<P>,
    ) -> Result<(Envelope<T>, String)>
    where
        P: Serialize,
        T: DeserializeOwned + Default,
    {
        let config = &self.inner.config;
        request
            .auth
            .apply_defaults(&config.credentials.auth_token, &config.credentials.account_id);

        let uri = self.uri(endpoint);
        let body = serde_json::to_string(&request)?;
        if config.log_request_bodies {
            debug!("POST {} {}", uri, redact_body(&request)?);
        } else {
            debug!("POST {}", uri);
        }

        let (envelope, raw) = retry_blocked(
            &config.blocked_retry,
            &self.inner.cancel,
            &uri,
            || self.attempt::<T>(&uri, &body),
        )
        .await?;

        match classify(&envelope) {
            Outcome::Failed(errors) => Err(Error::RemoteFailed {
                uri,
                status: envelope.status,
                errors,
                body: raw,
            }),
            _ => Ok((envelope, raw)),
        }
    }

    async fn attempt<T>(&self, uri: &str, body: &str) -> Result<Attempt<(Envelope<T>, String)>>
    where
        T: DeserializeOwned + Default,
    {
        let raw = self.inner.transport.post(uri, body.to_string()).await?;
        let envelope: Envelope<T> =
            serde_json::from_str(&raw).map_err(|source| Error::Decode {
                uri: uri.to_string(),
                source,
                body: raw.clone(),
            })?;

        match classify(&envelope) {
            Outcome::Blocked => Ok(Attempt::Retry(describe_errors(&envelope))),
            _ => Ok(Attempt::Done((envelope, raw))),
        }
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.inner.config)
            .field("transport", &self.inner.transport.name())
            .field("cancelled", &self.inner.cancel.is_cancelled())
            .finish()
    }
}

/// Request body with the auth token masked
fn redact_body<P: Serialize>(request: &Request<P>) -> Result<String> {
    let mut value = serde_json::to_value(request)?;
    if let Some(token) = value.get_mut("authToken") {
        *token = serde_json::Value::String("<REDACTED>".to_string());
    }
    Ok(value.to_string())
}

fn describe_errors<T>(envelope: &Envelope<T>) -> String {
    envelope
        .errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
