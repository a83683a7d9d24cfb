//! DNS resource records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::envelope::null_as_default;

/// TTL applied when none is given
pub const DEFAULT_TTL: u32 = 3600;

fn default_ttl() -> u32 {
    DEFAULT_TTL
}

/// A DNS record of a zone
///
/// The record type is passed through as an opaque string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecord {
    /// Server-assigned ID; absent before creation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Zone the record belongs to
    #[serde(default, rename = "zoneConfigId", skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<String>,

    /// Template the record was generated from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_template_id: Option<String>,

    /// Fully qualified record name
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub name: String,

    /// Record type (A, MX, CNAME, ...)
    #[serde(
        default,
        rename = "type",
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub record_type: String,

    /// Record data
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub content: String,

    /// Time to live in seconds
    #[serde(default = "default_ttl")]
    pub ttl: u32,

    /// Priority for MX/SRV records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,

    /// Last modification time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_change_date: Option<DateTime<Utc>>,
}

impl DnsRecord {
    /// A new, not yet created record
    pub fn new(
        name: impl Into<String>,
        record_type: impl Into<String>,
        content: impl Into<String>,
        ttl: u32,
    ) -> Self {
        Self {
            id: None,
            zone_id: None,
            record_template_id: None,
            name: name.into(),
            record_type: record_type.into(),
            content: content.into(),
            ttl,
            priority: None,
            last_change_date: None,
        }
    }

    /// A reference to an existing record, as used in delete lists
    pub fn reference(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::new("", "", "", DEFAULT_TTL)
        }
    }

    /// Set the zone
    pub fn in_zone(mut self, zone_id: impl Into<String>) -> Self {
        self.zone_id = Some(zone_id.into());
        self
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Value equality on name, type, content and TTL.
    ///
    /// The API does not return an identifier for records added in a batch,
    /// so a created record is recognised by these four fields.
    pub fn same_values(&self, other: &DnsRecord) -> bool {
        self.name == other.name
            && self.record_type == other.record_type
            && self.content == other.content
            && self.ttl == other.ttl
    }

    /// Server-assigned ID, or an empty string before creation
    pub fn id_str(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }
}
