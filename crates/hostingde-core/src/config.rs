//! Configuration types for the hosting.de client
//!
//! All structures deserialize with per-field defaults, so a config file only
//! needs to name what differs from the stock values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Production endpoint of the DNS API
pub const DEFAULT_BASE_URL: &str = "https://secure.hosting.de/api/dns/v1/json";

/// Environment variable holding the auth token
pub const ENV_AUTH_TOKEN: &str = "HOSTINGDE_AUTH_TOKEN";

/// Environment variable holding the account ID
pub const ENV_ACCOUNT_ID: &str = "HOSTINGDE_ACCOUNT_ID";

/// Main client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Endpoint prefix; operation names are appended with `/`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Default authentication for every request
    #[serde(default)]
    pub credentials: Credentials,

    /// HTTP timeout (in seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retry policy for "blocked" responses
    #[serde(default)]
    pub blocked_retry: BlockedRetryConfig,

    /// Backoff policy while waiting for a zone to become active
    #[serde(default)]
    pub activation_poll: ActivationPollConfig,

    /// Log outgoing request bodies at debug level (token redacted)
    #[serde(default)]
    pub log_request_bodies: bool,
}

impl ClientConfig {
    /// Configuration with stock policies and the given credentials
    pub fn new(credentials: Credentials) -> Self {
        Self {
            base_url: default_base_url(),
            credentials,
            timeout_secs: default_timeout_secs(),
            blocked_retry: BlockedRetryConfig::default(),
            activation_poll: ActivationPollConfig::default(),
            log_request_bodies: false,
        }
    }

    /// Override the endpoint prefix
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// HTTP timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.base_url.is_empty() {
            return Err(crate::Error::config("Base URL cannot be empty"));
        }
        if self.timeout_secs == 0 {
            return Err(crate::Error::config("HTTP timeout must be > 0"));
        }

        self.credentials.validate()?;
        self.blocked_retry.validate()?;
        self.activation_poll.validate()?;

        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(Credentials::default())
    }
}

/// Client-level credentials
///
/// Requests that leave their own auth fields empty inherit these.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// API auth token
    /// ⚠️ NEVER log this value
    #[serde(default)]
    pub auth_token: String,

    /// Account the requests act for; empty means the token's own account
    #[serde(default)]
    pub account_id: String,
}

impl Credentials {
    /// Explicit credentials
    pub fn new(auth_token: impl Into<String>, account_id: impl Into<String>) -> Self {
        Self {
            auth_token: auth_token.into(),
            account_id: account_id.into(),
        }
    }

    /// Resolve credentials from explicit values, falling back to the
    /// environment for whatever was not given.
    ///
    /// An empty token after fallback is a configuration error.
    pub fn resolve(
        explicit_token: Option<String>,
        explicit_account: Option<String>,
    ) -> Result<Self, crate::Error> {
        Self::resolve_with(explicit_token, explicit_account, |key| {
            std::env::var(key).ok()
        })
    }

    /// [`Credentials::resolve`] with an injectable variable lookup
    pub fn resolve_with<F>(
        explicit_token: Option<String>,
        explicit_account: Option<String>,
        lookup: F,
    ) -> Result<Self, crate::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let auth_token = explicit_token
            .filter(|t| !t.is_empty())
            .or_else(|| lookup(ENV_AUTH_TOKEN))
            .unwrap_or_default();
        let account_id = explicit_account
            .filter(|a| !a.is_empty())
            .or_else(|| lookup(ENV_ACCOUNT_ID))
            .unwrap_or_default();

        let credentials = Self {
            auth_token,
            account_id,
        };
        credentials.validate()?;
        Ok(credentials)
    }

    /// Reject an empty token
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.auth_token.trim().is_empty() {
            return Err(crate::Error::config(format!(
                "Auth token cannot be empty; pass it explicitly or set {}",
                ENV_AUTH_TOKEN
            )));
        }
        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("auth_token", &"<REDACTED>")
            .field("account_id", &self.account_id)
            .finish()
    }
}

/// Fixed-delay retry while the API reports a resource as blocked
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockedRetryConfig {
    /// Network calls allowed in total, the first one included
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,

    /// Pause between attempts (in milliseconds)
    #[serde(default = "default_blocked_delay_ms")]
    pub delay_ms: u64,
}

impl BlockedRetryConfig {
    /// Pause between attempts
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Validate the policy
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.max_attempts == 0 {
            return Err(crate::Error::config("Blocked retry max_attempts must be > 0"));
        }
        Ok(())
    }
}

impl Default for BlockedRetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            delay_ms: default_blocked_delay_ms(),
        }
    }
}

/// Exponential backoff while a zone is not yet active
///
/// The interval grows by `multiplier` up to `max_interval_ms`; polling stops
/// once the next wait would exceed `max_elapsed_ms`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivationPollConfig {
    /// First wait (in milliseconds)
    #[serde(default = "default_initial_interval_ms")]
    pub initial_interval_ms: u64,

    /// Growth factor of the interval
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,

    /// Interval cap (in milliseconds)
    #[serde(default = "default_max_interval_ms")]
    pub max_interval_ms: u64,

    /// Total polling budget (in milliseconds)
    #[serde(default = "default_max_elapsed_ms")]
    pub max_elapsed_ms: u64,

    /// Jitter applied to each wait; 0 disables it
    #[serde(default = "default_randomization_factor")]
    pub randomization_factor: f64,
}

impl ActivationPollConfig {
    /// Policy derived from an initial interval: cap at 10x, budget of 100x
    pub fn from_initial(initial: Duration) -> Self {
        let initial_ms = initial.as_millis() as u64;
        Self {
            initial_interval_ms: initial_ms,
            max_interval_ms: initial_ms.saturating_mul(10),
            max_elapsed_ms: initial_ms.saturating_mul(100),
            ..Self::default()
        }
    }

    /// Disable jitter
    pub fn without_jitter(mut self) -> Self {
        self.randomization_factor = 0.0;
        self
    }

    /// Validate the policy
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.initial_interval_ms == 0 {
            return Err(crate::Error::config(
                "Activation poll initial interval must be > 0",
            ));
        }
        if !self.multiplier.is_finite() || self.multiplier < 1.0 {
            return Err(crate::Error::config(
                "Activation poll multiplier must be a finite value >= 1.0",
            ));
        }
        if self.max_interval_ms < self.initial_interval_ms {
            return Err(crate::Error::config(
                "Activation poll max interval must not be below the initial interval",
            ));
        }
        if !(0.0..1.0).contains(&self.randomization_factor) {
            return Err(crate::Error::config(
                "Activation poll randomization factor must be in [0, 1)",
            ));
        }
        Ok(())
    }
}

impl Default for ActivationPollConfig {
    fn default() -> Self {
        Self {
            initial_interval_ms: default_initial_interval_ms(),
            multiplier: default_multiplier(),
            max_interval_ms: default_max_interval_ms(),
            max_elapsed_ms: default_max_elapsed_ms(),
            randomization_factor: default_randomization_factor(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_attempts() -> usize {
    8
}

fn default_blocked_delay_ms() -> u64 {
    1000
}

fn default_initial_interval_ms() -> u64 {
    3000
}

fn default_multiplier() -> f64 {
    1.5
}

fn default_max_interval_ms() -> u64 {
    30_000
}

fn default_max_elapsed_ms() -> u64 {
    300_000
}

fn default_randomization_factor() -> f64 {
    0.5
}
