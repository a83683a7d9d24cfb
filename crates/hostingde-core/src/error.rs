//! Error types for the hosting.de client
//!
//! Every remote or domain failure carries the request URI and the raw
//! response body, so a failed call can be diagnosed from its message alone.

use crate::model::ApiError;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the hosting.de client
#[derive(Error, Debug)]
pub enum Error {
    /// Network or connection failure (never retried)
    #[error("Error querying API {uri}: {message}")]
    Transport {
        /// Request URI
        uri: String,
        /// Underlying failure
        message: String,
    },

    /// The response body could not be read at all
    #[error("{}", describe_body(.uri, .body))]
    MalformedResponse {
        /// Request URI
        uri: String,
        /// Whatever part of the body was received
        body: String,
    },

    /// The response body is not the JSON shape the endpoint returns
    #[error("{source}: {}", describe_body(.uri, .body))]
    Decode {
        /// Request URI
        uri: String,
        /// Decoder failure
        #[source]
        source: serde_json::Error,
        /// Raw response body
        body: String,
    },

    /// A find call returned no entities
    #[error("Nothing found: {}", describe_body(.uri, .body))]
    NotFound {
        /// Request URI
        uri: String,
        /// Raw response body
        body: String,
    },

    /// The API answered with an error status that is not the blocked marker
    #[error("API reported status {status:?} ({}): {}", render_api_errors(.errors), describe_body(.uri, .body))]
    RemoteFailed {
        /// Request URI
        uri: String,
        /// Status string from the envelope
        status: String,
        /// Structured errors from the envelope
        errors: Vec<ApiError>,
        /// Raw response body
        body: String,
    },

    /// The resource stayed blocked for every allowed attempt
    #[error("Reached max retry count ({attempts} attempts), {uri} still reports the resource as blocked")]
    MaxRetriesExceeded {
        /// Request URI
        uri: String,
        /// Number of network calls made
        attempts: usize,
    },

    /// The zone never reached the active state within the polling budget
    #[error("Zone did not become active within {elapsed:?}: {last_observation}")]
    ActivationTimeout {
        /// The last reason a poll was rejected
        last_observation: String,
        /// Time spent polling
        elapsed: Duration,
    },

    /// The batched update response did not contain the record that was sent
    #[error("Response from zone {zone_id} did not contain the submitted record {name} {record_type} {content:?} (ttl {ttl})")]
    RecordNotEchoed {
        /// Zone the record was submitted to
        zone_id: String,
        /// Record name
        name: String,
        /// Record type
        record_type: String,
        /// Record content
        content: String,
        /// Record TTL
        ttl: u32,
    },

    /// A deleted record is still listed after the zone update
    #[error("Deleted record {record_id} is still present in zone {zone_id} after the update")]
    DeletionNotConfirmed {
        /// Zone the record belongs to
        zone_id: String,
        /// Record that should be gone
        record_id: String,
    },

    /// The client's cancellation token fired while an operation was waiting
    #[error("Operation cancelled")]
    Cancelled,

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The caller asked for a change the API cannot perform
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Request serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a transport error
    pub fn transport(uri: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            uri: uri.into(),
            message: message.into(),
        }
    }

    /// Create a malformed response error
    pub fn malformed(uri: impl Into<String>, body: impl Into<String>) -> Self {
        Self::MalformedResponse {
            uri: uri.into(),
            body: body.into(),
        }
    }

    /// Whether the remote side was still busy when the client gave up.
    ///
    /// Both cases exhausted the built-in retries; repeating the whole
    /// operation later may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Error::MaxRetriesExceeded { .. } | Error::ActivationTimeout { .. }
        )
    }

    /// Whether the remote API reported that nothing matched
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}

/// Render a response body for humans.
///
/// The API escapes newlines inside its messages; they are restored here.
pub fn restore_newlines(body: &str) -> String {
    body.replace("\\n", "\n")
}

fn describe_body(uri: &str, body: &str) -> String {
    format!(
        "Request URI was: {} Error message body: {}",
        uri,
        restore_newlines(body)
    )
}

fn render_api_errors(errors: &[ApiError]) -> String {
    if errors.is_empty() {
        return "no error details".to_string();
    }

    errors
        .iter()
        .map(ApiError::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
