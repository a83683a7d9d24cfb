use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ManagedResource;
use crate::client::ApiClient;
use crate::error::Result;
use crate::model::{DEFAULT_TTL, DnsRecord};

fn default_ttl() -> u32 {
    DEFAULT_TTL
}

/// State of a managed DNS record
///
/// An update replaces the record, so its ID changes with every update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordState {
    /// Server-assigned ID
    #[serde(default)]
    pub id: String,

    /// Zone the record belongs to
    pub zone_id: String,

    /// Fully qualified record name
    pub name: String,

    /// Record type, passed through as given
    #[serde(rename = "type")]
    pub record_type: String,

    /// Record data
    pub content: String,

    /// Time to live in seconds
    #[serde(default = "default_ttl")]
    pub ttl: u32,
}

impl RecordState {
    /// Desired state of a new record with the default TTL
    pub fn new(
        zone_id: impl Into<String>,
        name: impl Into<String>,
        record_type: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            zone_id: zone_id.into(),
            name: name.into(),
            record_type: record_type.into(),
            content: content.into(),
            ttl: DEFAULT_TTL,
        }
    }

    /// Set the TTL
    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    fn to_record(&self) -> DnsRecord {
        DnsRecord::new(
            self.name.as_str(),
            self.record_type.as_str(),
            self.content.as_str(),
            self.ttl,
        )
    }

    fn from_record(zone_id: &str, record: &DnsRecord) -> Self {
        Self {
            id: record.id_str().to_string(),
            zone_id: record.zone_id.clone().unwrap_or_else(|| zone_id.to_string()),
            name: record.name.clone(),
            record_type: record.record_type.clone(),
            content: record.content.clone(),
            ttl: record.ttl,
        }
    }

    async fn apply(client: &ApiClient, desired: &Self, previous_id: Option<&str>) -> Result<Self> {
        let echoed = client
            .records()
            .create_or_update(&desired.zone_id, desired.to_record(), previous_id)
            .await?;

        Ok(Self::from_record(&desired.zone_id, &echoed))
    }
}

#[async_trait]
impl ManagedResource for RecordState {
    fn id(&self) -> &str {
        &self.id
    }

    async fn create(client: &ApiClient, desired: &Self) -> Result<Self> {
        Self::apply(client, desired, None).await
    }

    async fn read(client: &ApiClient, current: &Self) -> Result<Option<Self>> {
        match client.records().get_by_id(&current.zone_id, &current.id).await {
            Ok(record) => Ok(Some(Self::from_record(&current.zone_id, &record))),
            Err(e) if e.is_not_found() => {
                debug!("Record {} in zone {} is gone", current.id, current.zone_id);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn update(client: &ApiClient, current: &Self, desired: &Self) -> Result<Self> {
        let mut desired = desired.clone();
        if desired.zone_id.is_empty() {
            desired.zone_id = current.zone_id.clone();
        }
        Self::apply(client, &desired, Some(&current.id)).await
    }

    async fn delete(client: &ApiClient, current: &Self) -> Result<()> {
        client.records().delete(&current.zone_id, &current.id).await
    }
}
