// # Transport Trait
//
// Defines the single network primitive the client needs: POST a JSON body
// to a URI and hand back the raw response body.
//
// ## Implementations
//
// - reqwest: `hostingde-http` crate
// - Scripted test doubles in `tests/common`
//
// ## Usage
//
// ```rust,ignore
// use hostingde_core::{ApiClient, ClientConfig, Credentials};
// use std::sync::Arc;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let transport = /* Transport implementation */;
//     let config = ClientConfig::new(Credentials::resolve(None, None)?);
//     let client = ApiClient::new(config, Arc::new(transport))?;
//
//     let zone = client.zones().get("zone-id").await?;
//     println!("{}", zone.name);
//
//     Ok(())
// }
// ```

use async_trait::async_trait;

/// Trait for HTTP transports
///
/// A transport performs exactly one POST per call and returns the body as
/// text, whatever the HTTP status code. It does not inspect the JSON, add
/// credentials or retry; status classification and retry belong to
/// [`crate::ApiClient`].
///
/// # Errors
///
/// - [`crate::Error::Transport`] when the request could not be sent or no
///   response arrived (connection refused, timeout, TLS failure)
/// - [`crate::Error::MalformedResponse`] when a response arrived but its body
///   could not be read as UTF-8 text
///
/// # Thread Safety
///
/// Implementations must be thread-safe and usable across async tasks.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `body` as `application/json` to `uri`
    ///
    /// # Returns
    ///
    /// The raw response body
    async fn post(&self, uri: &str, body: String) -> crate::Result<String>;

    /// Transport name for logging
    fn name(&self) -> &'static str {
        "transport"
    }
}
