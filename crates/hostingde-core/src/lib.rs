// # hostingde-core
//
// Client and reconciliation layer for the hosting.de DNS API.
//
// ## Architecture Overview
//
// - **Transport**: Trait for POSTing a JSON body and returning the raw reply
// - **Status classifier**: Maps a response envelope to success, pending,
//   blocked or failed
// - **Retry controller**: Bounded retry while blocked, exponential polling
//   until a zone is active; both cancellable
// - **ApiClient**: Zone and record operations on top of the above
// - **Resources**: Create/read/update/delete over zone and record state
//
// ## Design Principles
//
// 1. **No network code in the core**: Transports are injected
// 2. **Immutable configuration**: A client is configured once and shared
// 3. **Read-back after every mutation**: Zone edits are asynchronous remotely

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod resource;
pub mod retry;
pub mod status;
pub mod traits;

// Re-export core types for convenience
pub use client::{ApiClient, RecordOperations, ZoneOperations};
pub use config::{ActivationPollConfig, BlockedRetryConfig, ClientConfig, Credentials};
pub use error::{Error, Result};
pub use model::{DnsRecord, Filter, Zone, ZoneConfig, ZoneType};
pub use resource::{ManagedResource, RecordState, ZoneState};
pub use status::{Outcome, classify};
pub use traits::Transport;
pub use tokio_util::sync::CancellationToken;
