use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ManagedResource;
use crate::client::ApiClient;
use crate::error::{Error, Result};
use crate::model::{Endpoint, Filter, ZoneConfig, ZoneType};

/// State of a managed zone
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneState {
    /// Server-assigned ID; stable across updates
    #[serde(default)]
    pub id: String,

    /// Domain name
    pub name: String,

    /// Zone type; cannot change after creation
    #[serde(default, rename = "type")]
    pub zone_type: ZoneType,

    /// Hostmaster email; empty lets the server choose `hostmaster@<name>`
    #[serde(default)]
    pub email: String,
}

impl ZoneState {
    /// Desired state of a new zone
    pub fn new(name: impl Into<String>, zone_type: ZoneType) -> Self {
        Self {
            name: name.into(),
            zone_type,
            ..Self::default()
        }
    }

    /// Set the hostmaster email
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    fn from_config(config: &ZoneConfig) -> Self {
        Self {
            id: config.id_str().to_string(),
            name: config.name.clone(),
            zone_type: config.zone_type,
            email: config.email_address.clone(),
        }
    }
}

#[async_trait]
impl ManagedResource for ZoneState {
    fn id(&self) -> &str {
        &self.id
    }

    async fn create(client: &ApiClient, desired: &Self) -> Result<Self> {
        let config = ZoneConfig::new(desired.name.as_str(), desired.zone_type)
            .with_email(desired.email.as_str());
        let created = client.zones().create(config).await?;

        let id = created.zone_config.id_str();
        if id.is_empty() {
            return Err(Error::malformed(
                client.uri(Endpoint::ZoneCreate),
                format!("zone {} was created without an ID", desired.name),
            ));
        }

        let active = client.zones().get(id).await?;
        Ok(Self::from_config(&active))
    }

    async fn read(client: &ApiClient, current: &Self) -> Result<Option<Self>> {
        // a pending zone is reported as is; only mutations wait for activation
        match client.zones().find(Filter::zone_config_id(&current.id)).await {
            Ok(zone) => Ok(Some(Self::from_config(&zone.zone_config))),
            Err(e) if e.is_not_found() => {
                debug!("Zone {} is gone", current.id);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn update(client: &ApiClient, current: &Self, desired: &Self) -> Result<Self> {
        if desired.zone_type != current.zone_type {
            return Err(Error::invalid_input(format!(
                "zone type cannot change from {} to {}; the zone must be replaced",
                current.zone_type, desired.zone_type
            )));
        }

        let mut config = client.zones().get(&current.id).await?;
        config.name = desired.name.clone();
        if !desired.email.is_empty() {
            config.email_address = desired.email.clone();
        }

        client.zones().update(config, Vec::new(), Vec::new()).await?;

        let active = client.zones().get(&current.id).await?;
        Ok(Self::from_config(&active))
    }

    async fn delete(client: &ApiClient, current: &Self) -> Result<()> {
        client.zones().delete_and_purge(&current.id).await
    }
}
