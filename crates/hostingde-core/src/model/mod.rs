//! Wire model of the hosting.de DNS API
//!
//! All JSON field names are camelCase on the wire.

mod endpoint;
mod envelope;
mod filter;
mod params;
mod record;
mod zone;

pub use endpoint::Endpoint;
pub use envelope::{
    ApiError, ApiResponse, Auth, Envelope, FindParams, FindResult, Metadata, Request, Sort,
};
pub use filter::{Connective, Filter, RECORD_ID, ZONE_CONFIG_ID};
pub use params::{RecordsUpdate, ZoneCreate, ZoneRef, ZoneUpdate};
pub use record::{DEFAULT_TTL, DnsRecord};
pub use zone::{STATUS_ACTIVE, SoaValues, Zone, ZoneConfig, ZoneType};
