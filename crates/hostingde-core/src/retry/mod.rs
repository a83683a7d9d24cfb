//! Retry controller
//!
//! Two bounded policies wrap remote calls:
//!
//! - **Blocked retry**: the API reported the resource as locked; wait a fixed
//!   delay and resubmit the identical request, up to a fixed number of calls.
//! - **Activation poll**: a zone was found but is not active yet; wait with
//!   exponential backoff and look it up again, within a total time budget.
//!
//! Every wait races the client's cancellation token. Errors returned by the
//! wrapped operation end the loop at once and are never retried.

mod backoff;

pub use backoff::ExponentialBackoff;

use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::config::{ActivationPollConfig, BlockedRetryConfig};
use crate::error::{Error, Result};

/// Result of one attempt of a retried operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attempt<T> {
    /// The operation finished
    Done(T),
    /// The remote side is not ready; the string says why
    Retry(String),
}

/// Sleep for `duration` unless `cancel` fires first
pub async fn sleep_or_cancel(duration: Duration, cancel: &CancellationToken) -> Result<()> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(Error::Cancelled),
        _ = tokio::time::sleep(duration) => Ok(()),
    }
}

/// Run `op` until it is not blocked, making at most `max_attempts` calls.
///
/// No wait follows the final attempt: when it is still blocked the loop
/// fails with [`Error::MaxRetriesExceeded`] right away.
pub async fn retry_blocked<T, F, Fut>(
    policy: &BlockedRetryConfig,
    cancel: &CancellationToken,
    uri: &str,
    mut op: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Attempt<T>>>,
{
    for attempt in 1..=policy.max_attempts {
        match op().await? {
            Attempt::Done(value) => return Ok(value),
            Attempt::Retry(reason) => {
                warn!(
                    "Request to {} blocked ({}), attempt {}/{}",
                    uri, reason, attempt, policy.max_attempts
                );
                if attempt < policy.max_attempts {
                    sleep_or_cancel(policy.delay(), cancel).await?;
                }
            }
        }
    }

    Err(Error::MaxRetriesExceeded {
        uri: uri.to_string(),
        attempts: policy.max_attempts,
    })
}

/// Run `op` until it reports done, backing off exponentially in between.
///
/// Fails with [`Error::ActivationTimeout`] once the polling budget is spent,
/// carrying the last reason `op` gave.
pub async fn poll_until_ready<T, F, Fut>(
    policy: &ActivationPollConfig,
    cancel: &CancellationToken,
    mut op: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Attempt<T>>>,
{
    let mut backoff = ExponentialBackoff::new(policy);

    loop {
        let reason = match op().await? {
            Attempt::Done(value) => return Ok(value),
            Attempt::Retry(reason) => reason,
        };

        let Some(wait) = backoff.next_backoff() else {
            return Err(Error::ActivationTimeout {
                last_observation: reason,
                elapsed: backoff.elapsed(),
            });
        };

        debug!("{}, polling again in {:?}", reason, wait);
        sleep_or_cancel(wait, cancel).await?;
    }
}
