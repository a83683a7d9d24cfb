use std::fmt;

/// Operation suffixes of the DNS API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    ZoneCreate,
    ZoneUpdate,
    ZoneDelete,
    ZonePurgeRestorable,
    ZoneConfigsFind,
    ZonesFind,
    RecordsFind,
    RecordsUpdate,
}

impl Endpoint {
    /// Path segment appended to the base URL
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::ZoneCreate => "zoneCreate",
            Endpoint::ZoneUpdate => "zoneUpdate",
            Endpoint::ZoneDelete => "zoneDelete",
            Endpoint::ZonePurgeRestorable => "zonePurgeRestorable",
            Endpoint::ZoneConfigsFind => "zoneConfigsFind",
            Endpoint::ZonesFind => "zonesFind",
            Endpoint::RecordsFind => "recordsFind",
            Endpoint::RecordsUpdate => "recordsUpdate",
        }
    }

    /// Full URI under `base_url`
    pub fn uri(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.path())
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uri_joins_with_single_slash() {
        assert_eq!(
            Endpoint::ZonePurgeRestorable.uri("https://api.test/dns/v1/json/"),
            "https://api.test/dns/v1/json/zonePurgeRestorable"
        );
        assert_eq!(
            Endpoint::RecordsFind.uri("https://api.test"),
            "https://api.test/recordsFind"
        );
    }
}
