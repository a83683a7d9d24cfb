//! Zone operations
//!
//! Zone edits are applied asynchronously by the API: a mutation answers
//! `pending` and the zone stays non-active for a while. Reads that need a
//! stable zone go through [`ZoneOperations::find_active`], which polls until
//! the zone reports `active`.

use tracing::{debug, info};

use super::ApiClient;
use crate::error::Result;
use crate::model::{
    DnsRecord, Endpoint, Filter, Request, Zone, ZoneConfig, ZoneCreate, ZoneRef, ZoneUpdate,
};
use crate::retry::{Attempt, poll_until_ready};

/// Zone operations of an [`ApiClient`]
#[derive(Debug, Clone, Copy)]
pub struct ZoneOperations<'a> {
    client: &'a ApiClient,
}

impl<'a> ZoneOperations<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Create a zone served by the account's default name servers
    ///
    /// Accepts success or pending; the returned snapshot carries the
    /// server-assigned ID.
    pub async fn create(&self, zone_config: ZoneConfig) -> Result<Zone> {
        self.create_with(ZoneCreate {
            zone_config,
            records: Vec::new(),
            use_default_nameserver_set: true,
        })
        .await
    }

    /// Create a zone from explicit parameters
    pub async fn create_with(&self, params: ZoneCreate) -> Result<Zone> {
        let name = params.zone_config.name.clone();
        let envelope = self
            .client
            .send::<_, Zone>(Endpoint::ZoneCreate, Request::new(params))
            .await?;

        info!(
            "Created zone {} ({}), status {}",
            name,
            envelope.response.zone_config.id_str(),
            envelope.status
        );
        Ok(envelope.response)
    }

    /// Find a zone config and wait until it is active
    ///
    /// A failing lookup ends the wait at once; only a non-active status is
    /// retried.
    pub async fn find_active(&self, filter: Filter) -> Result<ZoneConfig> {
        let config = &self.client.config().activation_poll;
        let cancel = self.client.cancellation_token();

        poll_until_ready(config, cancel, || {
            let filter = filter.clone();
            async move {
                let zone: ZoneConfig = self
                    .client
                    .find_one(Endpoint::ZoneConfigsFind, filter)
                    .await?;

                if zone.is_active() {
                    Ok(Attempt::Done(zone))
                } else {
                    Ok(Attempt::Retry(format!(
                        "zone {} has status {:?}",
                        zone.name, zone.status
                    )))
                }
            }
        })
        .await
    }

    /// Active zone config by ID
    pub async fn get(&self, zone_id: &str) -> Result<ZoneConfig> {
        self.find_active(Filter::zone_config_id(zone_id)).await
    }

    /// Zone config and records of the first zone matching `filter`
    ///
    /// Does not wait for activation.
    pub async fn find(&self, filter: Filter) -> Result<Zone> {
        self.client.find_one(Endpoint::ZonesFind, filter).await
    }

    /// Update a zone and its records in one batch
    ///
    /// Accepts success or pending; returns the updated config with the full
    /// record list after the update.
    pub async fn update(
        &self,
        zone_config: ZoneConfig,
        records_to_add: Vec<DnsRecord>,
        records_to_delete: Vec<DnsRecord>,
    ) -> Result<Zone> {
        debug!(
            "Updating zone {}: {} to add, {} to delete",
            zone_config.id_str(),
            records_to_add.len(),
            records_to_delete.len()
        );

        let envelope = self
            .client
            .send::<_, Zone>(
                Endpoint::ZoneUpdate,
                Request::new(ZoneUpdate {
                    zone_config,
                    records_to_add,
                    records_to_delete,
                }),
            )
            .await?;

        Ok(envelope.response)
    }

    /// Soft-delete a zone; it stays restorable until purged
    pub async fn delete(&self, zone_id: &str) -> Result<()> {
        self.client
            .send::<_, serde_json::Value>(Endpoint::ZoneDelete, zone_ref(zone_id))
            .await?;

        info!("Deleted zone {}", zone_id);
        Ok(())
    }

    /// Permanently remove a soft-deleted zone
    pub async fn purge(&self, zone_id: &str) -> Result<()> {
        self.client
            .send::<_, serde_json::Value>(Endpoint::ZonePurgeRestorable, zone_ref(zone_id))
            .await?;

        info!("Purged zone {}", zone_id);
        Ok(())
    }

    /// Delete a zone and purge it, so no restorable copy is left behind
    pub async fn delete_and_purge(&self, zone_id: &str) -> Result<()> {
        self.delete(zone_id).await?;
        self.purge(zone_id).await
    }
}

fn zone_ref(zone_id: &str) -> Request<ZoneRef> {
    Request::new(ZoneRef {
        zone_config_id: zone_id.to_string(),
    })
}
