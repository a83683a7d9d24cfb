//! Zone configuration objects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::envelope::null_as_default;
use super::record::DnsRecord;

/// Status string of a zone that is ready for edits
pub const STATUS_ACTIVE: &str = "active";

/// Zone type
///
/// Fixed at creation; changing it requires replacing the zone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ZoneType {
    /// Zone served from hosting.de records
    #[default]
    Native,
    /// Primary zone transferred to secondaries
    Master,
    /// Secondary zone pulled from a master
    Slave,
}

impl ZoneType {
    /// Wire name of the type
    pub fn as_str(&self) -> &'static str {
        match self {
            ZoneType::Native => "NATIVE",
            ZoneType::Master => "MASTER",
            ZoneType::Slave => "SLAVE",
        }
    }
}

impl fmt::Display for ZoneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ZoneType {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "NATIVE" => Ok(ZoneType::Native),
            "MASTER" => Ok(ZoneType::Master),
            "SLAVE" => Ok(ZoneType::Slave),
            other => Err(crate::Error::invalid_input(format!(
                "Unknown zone type '{}'. Valid types: NATIVE, MASTER, SLAVE",
                other
            ))),
        }
    }
}

/// SOA timer values of a zone
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SoaValues {
    /// Refresh interval
    pub refresh: u32,
    /// Retry interval
    pub retry: u32,
    /// Expiry
    pub expire: u32,
    /// SOA record TTL
    pub ttl: u32,
    /// Negative caching TTL
    pub negative_ttl: u32,
}

/// Configuration of a DNS zone
///
/// The ID is assigned by the server and absent until the zone is created.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneConfig {
    /// Server-assigned ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Owning account
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub account_id: String,

    /// Lifecycle status (`active`, `pending`, ...)
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub status: String,

    /// Domain name
    pub name: String,

    /// Unicode form of the domain name
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub name_unicode: String,

    /// Master server for SLAVE zones
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub master_ip: String,

    /// Zone type
    #[serde(rename = "type")]
    pub zone_type: ZoneType,

    /// Hostmaster contact; the server defaults it to `hostmaster@<name>`
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub email_address: String,

    /// Hosts allowed to transfer the zone
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub zone_transfer_whitelist: Vec<String>,

    /// Last modification time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_change_date: Option<DateTime<Utc>>,

    /// Name server set serving the zone
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub dns_server_group_id: String,

    /// DNSSEC mode
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub dns_sec_mode: String,

    /// SOA timers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soa_values: Option<SoaValues>,

    /// Template values, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_values: Option<serde_json::Value>,
}

impl ZoneConfig {
    /// A new, not yet created zone
    pub fn new(name: impl Into<String>, zone_type: ZoneType) -> Self {
        Self {
            name: name.into(),
            zone_type,
            ..Self::default()
        }
    }

    /// Set the hostmaster email
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email_address = email.into();
        self
    }

    /// Whether the zone accepts edits
    pub fn is_active(&self) -> bool {
        self.status == STATUS_ACTIVE
    }

    /// Server-assigned ID, or an empty string before creation
    pub fn id_str(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }
}

/// A zone together with its records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    /// Zone configuration
    #[serde(default, deserialize_with = "null_as_default")]
    pub zone_config: ZoneConfig,

    /// All records of the zone
    #[serde(default, deserialize_with = "null_as_default")]
    pub records: Vec<DnsRecord>,
}
