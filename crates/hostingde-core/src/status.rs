//! Response status classification
//!
//! The API reports the outcome of a call in a status string next to a list
//! of structured errors. A resource locked by a concurrent edit is reported
//! as status `error` with an error entry whose value is `blocked`; that case
//! is transient and retried by the client.

use crate::model::{ApiError, ApiResponse};

/// Status of a call that was applied
pub const STATUS_SUCCESS: &str = "success";

/// Status of a call that was accepted but not yet applied
pub const STATUS_PENDING: &str = "pending";

/// Status of a rejected call
pub const STATUS_ERROR: &str = "error";

/// Error value marking a locked resource
pub const BLOCKED_MARKER: &str = "blocked";

/// How a response should be treated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The call was applied
    Success,
    /// The call was accepted; the zone may still be activating
    Pending,
    /// The resource is locked by a concurrent edit
    Blocked,
    /// The call was rejected
    Failed(Vec<ApiError>),
}

impl Outcome {
    /// Success and pending are both accepted by write operations
    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Success | Outcome::Pending)
    }
}

/// Classify a decoded response
pub fn classify<R: ApiResponse + ?Sized>(response: &R) -> Outcome {
    match response.status() {
        STATUS_SUCCESS => Outcome::Success,
        STATUS_PENDING => Outcome::Pending,
        STATUS_ERROR if is_blocked(response.errors()) => Outcome::Blocked,
        _ => Outcome::Failed(response.errors().to_vec()),
    }
}

fn is_blocked(errors: &[ApiError]) -> bool {
    errors.iter().any(|e| e.value == BLOCKED_MARKER)
}
