//! Declarative resource layer
//!
//! Plain create/read/update/delete over the state of a zone or a record, as
//! consumed by provisioning tools. Every mutation is followed by a read-back,
//! so the returned state is what the API reports, not what was requested.

mod record;
mod zone;

pub use record::RecordState;
pub use zone::ZoneState;

use async_trait::async_trait;

use crate::client::ApiClient;
use crate::error::Result;

/// CRUD lifecycle of a remote resource
#[async_trait]
pub trait ManagedResource: Sized + Send + Sync {
    /// Server-assigned ID; empty until created
    fn id(&self) -> &str;

    /// Create the resource described by `desired`
    async fn create(client: &ApiClient, desired: &Self) -> Result<Self>;

    /// Refresh `current` from the API
    ///
    /// # Returns
    ///
    /// - `Ok(None)` if the resource no longer exists
    async fn read(client: &ApiClient, current: &Self) -> Result<Option<Self>>;

    /// Move `current` to `desired`
    async fn update(client: &ApiClient, current: &Self, desired: &Self) -> Result<Self>;

    /// Remove the resource
    async fn delete(client: &ApiClient, current: &Self) -> Result<()>;
}
