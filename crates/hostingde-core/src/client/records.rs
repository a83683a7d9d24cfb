//! Record operations
//!
//! Records are changed through the batched zone update: an edit is a delete
//! of the old record plus an add of the new one. The API does not return an
//! ID for a record added in a batch, so the new record is located in the
//! returned record list by value.

use tracing::{debug, info, warn};

use super::ApiClient;
use crate::error::{Error, Result};
use crate::model::{DnsRecord, Endpoint, Filter, FindParams, RecordsUpdate, Request, Zone};

/// Page size of record listings
pub const LIST_LIMIT: u32 = 1000;

/// Record operations of an [`ApiClient`]
#[derive(Debug, Clone, Copy)]
pub struct RecordOperations<'a> {
    client: &'a ApiClient,
}

impl<'a> RecordOperations<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Records matching `filter`; an empty result is [`Error::NotFound`]
    pub async fn list(&self, filter: Filter) -> Result<Vec<DnsRecord>> {
        self.find(FindParams::new(filter, LIST_LIMIT)).await
    }

    /// Records matching explicit find parameters
    pub async fn find(&self, params: FindParams) -> Result<Vec<DnsRecord>> {
        self.client.find(Endpoint::RecordsFind, params).await
    }

    /// First record matching `filter`
    pub async fn get(&self, filter: Filter) -> Result<DnsRecord> {
        self.client.find_one(Endpoint::RecordsFind, filter).await
    }

    /// Record by zone and record ID
    ///
    /// An empty `zone_id` looks the record up by its ID alone; the zone is
    /// then taken from the reply.
    pub async fn get_by_id(&self, zone_id: &str, record_id: &str) -> Result<DnsRecord> {
        let filter = if zone_id.is_empty() {
            Filter::record_id(record_id)
        } else {
            Filter::record_in_zone(zone_id, record_id)
        };
        self.get(filter).await
    }

    /// Add `record` to a zone, replacing `previous_id` if given
    ///
    /// Returns the record as listed by the API after the update, including
    /// its new server-assigned ID.
    ///
    /// # Errors
    ///
    /// [`Error::RecordNotEchoed`] if the updated zone lists no record other
    /// than `previous_id` with the submitted name, type, content and TTL.
    pub async fn create_or_update(
        &self,
        zone_id: &str,
        record: DnsRecord,
        previous_id: Option<&str>,
    ) -> Result<DnsRecord> {
        let previous_id = previous_id.filter(|id| !id.is_empty());
        let zone_config = self.client.zones().get(zone_id).await?;

        let wanted = DnsRecord {
            id: None,
            zone_id: None,
            last_change_date: None,
            ..record
        };
        let to_delete = previous_id
            .map(|id| vec![DnsRecord::reference(id)])
            .unwrap_or_default();

        let updated = self
            .client
            .zones()
            .update(zone_config, vec![wanted.clone()], to_delete)
            .await?;

        // a pending reply may still list the replaced record
        let candidates = updated
            .records
            .iter()
            .filter(|r| previous_id.is_none_or(|id| r.id_str() != id));
        let Some(found) = reconcile(&wanted, candidates) else {
            return Err(Error::RecordNotEchoed {
                zone_id: zone_id.to_string(),
                name: wanted.name,
                record_type: wanted.record_type,
                content: wanted.content,
                ttl: wanted.ttl,
            });
        };

        info!(
            "Record {} {} in zone {} has ID {}",
            found.name,
            found.record_type,
            zone_id,
            found.id_str()
        );
        Ok(found.clone())
    }

    /// Delete a record from a zone
    ///
    /// The record's absence from the updated record list confirms the
    /// deletion, whatever status the update reported.
    pub async fn delete(&self, zone_id: &str, record_id: &str) -> Result<()> {
        let zone_config = self.client.zones().get(zone_id).await?;

        let updated = self
            .client
            .zones()
            .update(zone_config, Vec::new(), vec![DnsRecord::reference(record_id)])
            .await?;

        if updated.records.iter().any(|r| r.id_str() == record_id) {
            return Err(Error::DeletionNotConfirmed {
                zone_id: zone_id.to_string(),
                record_id: record_id.to_string(),
            });
        }

        info!("Deleted record {} from zone {}", record_id, zone_id);
        Ok(())
    }

    /// Change records directly, without touching the zone config
    pub async fn update_records(
        &self,
        zone_id: &str,
        records_to_add: Vec<DnsRecord>,
        records_to_modify: Vec<DnsRecord>,
        records_to_delete: Vec<DnsRecord>,
    ) -> Result<Zone> {
        debug!(
            "Updating records of zone {}: {} to add, {} to modify, {} to delete",
            zone_id,
            records_to_add.len(),
            records_to_modify.len(),
            records_to_delete.len()
        );

        let envelope = self
            .client
            .send::<_, Zone>(
                Endpoint::RecordsUpdate,
                Request::new(RecordsUpdate {
                    zone_config_id: zone_id.to_string(),
                    records_to_add,
                    records_to_modify,
                    records_to_delete,
                }),
            )
            .await?;

        Ok(envelope.response)
    }
}

/// Locate `wanted` in a returned record list by name, type, content and TTL.
///
/// When several records share all four values the first one is returned and
/// the collision is logged; the API gives no way to tell them apart.
pub fn reconcile<'r, I>(wanted: &DnsRecord, returned: I) -> Option<&'r DnsRecord>
where
    I: IntoIterator<Item = &'r DnsRecord>,
{
    let mut matches = returned.into_iter().filter(|r| wanted.same_values(r));
    let first = matches.next()?;

    let others = matches.count();
    if others > 0 {
        warn!(
            "{} records match {} {} {:?} (ttl {}), using {}",
            others + 1,
            wanted.name,
            wanted.record_type,
            wanted.content,
            wanted.ttl,
            first.id_str()
        );
    }

    Some(first)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn echoed(id: &str, name: &str, record_type: &str, content: &str, ttl: u32) -> DnsRecord {
        let mut record = DnsRecord::new(name, record_type, content, ttl).in_zone("z1");
        record.id = Some(id.to_string());
        record
    }

    #[test]
    fn test_reconcile_picks_exact_match() {
        let wanted = DnsRecord::new("test.example.test", "CNAME", "www.example.com", 3600);
        let returned = vec![
            echoed("r1", "example.test", "NS", "ns1.hosting.de", 86400),
            echoed("r2", "test.example.test", "CNAME", "www.example.com", 60),
            echoed("r3", "test.example.test", "CNAME", "www.example.com", 3600),
        ];

        assert_eq!(reconcile(&wanted, &returned).unwrap().id_str(), "r3");
    }

    #[test]
    fn test_reconcile_duplicates_take_first() {
        let wanted = DnsRecord::new("example.test", "MX", "10 mail.example.test", 3600);
        let returned = vec![
            echoed("r1", "example.test", "MX", "10 mail.example.test", 3600),
            echoed("r2", "example.test", "MX", "10 mail.example.test", 3600),
        ];

        assert_eq!(reconcile(&wanted, &returned).unwrap().id_str(), "r1");
    }

    #[test]
    fn test_reconcile_accepts_filtered_candidates() {
        let wanted = DnsRecord::new("www.example.test", "A", "192.0.2.1", 3600);
        let returned = vec![
            echoed("r-old", "www.example.test", "A", "192.0.2.1", 3600),
            echoed("r-new", "www.example.test", "A", "192.0.2.1", 3600),
        ];

        let found = reconcile(&wanted, returned.iter().filter(|r| r.id_str() != "r-old"));
        assert_eq!(found.unwrap().id_str(), "r-new");
    }

    #[test]
    fn test_reconcile_without_match() {
        let wanted = DnsRecord::new("a.example.test", "A", "192.0.2.1", 3600);
        let returned = vec![echoed("r1", "a.example.test", "A", "192.0.2.2", 3600)];

        assert!(reconcile(&wanted, &returned).is_none());
        assert!(reconcile(&wanted, &Vec::<DnsRecord>::new()).is_none());
    }
}
