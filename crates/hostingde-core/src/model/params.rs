//! Parameters of the mutating endpoints

use serde::Serialize;

use super::record::DnsRecord;
use super::zone::ZoneConfig;

/// `zoneCreate` parameters
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneCreate {
    /// Zone to create
    pub zone_config: ZoneConfig,

    /// Initial records besides the default name server records
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub records: Vec<DnsRecord>,

    /// Attach the account's default name server set
    pub use_default_nameserver_set: bool,
}

/// `zoneUpdate` parameters
///
/// Carries the full zone config; records are changed through the add and
/// delete lists in the same call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneUpdate {
    /// Desired zone config, including its ID
    pub zone_config: ZoneConfig,

    /// Records to add
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub records_to_add: Vec<DnsRecord>,

    /// Records to remove, referenced by ID
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub records_to_delete: Vec<DnsRecord>,
}

/// `zoneDelete` and `zonePurgeRestorable` parameters
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneRef {
    /// Zone to act on
    pub zone_config_id: String,
}

/// `recordsUpdate` parameters
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordsUpdate {
    /// Zone the records belong to
    pub zone_config_id: String,

    /// Records to add
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub records_to_add: Vec<DnsRecord>,

    /// Records to change in place
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub records_to_modify: Vec<DnsRecord>,

    /// Records to remove, referenced by ID
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub records_to_delete: Vec<DnsRecord>,
}
