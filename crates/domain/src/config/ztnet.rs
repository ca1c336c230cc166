use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::fallthrough::Fallthrough;
use crate::network_zone::NetworkZone;

/// ZTNET controller and record-serving configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ZtnetConfig {
    /// Base URL of the ZTNET REST API (e.g., "https://ztnet.example.com")
    #[serde(default)]
    pub endpoint: String,

    /// API access token. Falls back to the ZTNET_API_TOKEN environment
    /// variable when empty.
    #[serde(default)]
    pub token: String,

    /// Monitored networks, one zone per network. At least one is required.
    #[serde(default)]
    pub networks: Vec<NetworkZoneConfig>,

    /// Interval between membership refreshes, in seconds
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,

    /// TTL applied to every answer record, in seconds
    #[serde(default = "default_record_ttl_secs")]
    pub record_ttl_secs: u32,

    /// Names outside (or unanswerable within) our zones that should be
    /// delegated to the next handler. Absent = refuse; empty list = all names.
    #[serde(default)]
    pub fallthrough: Option<Vec<String>>,
}

/// One monitored network: a DNS zone and the ZeroTier network ID backing it
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NetworkZoneConfig {
    pub zone: String,
    pub network_id: String,
}

impl Default for ZtnetConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            token: String::new(),
            networks: Vec::new(),
            refresh_secs: default_refresh_secs(),
            record_ttl_secs: default_record_ttl_secs(),
            fallthrough: None,
        }
    }
}

impl ZtnetConfig {
    /// Validate and canonicalize the configured networks.
    pub fn network_zones(&self) -> Result<Vec<NetworkZone>, DomainError> {
        self.networks
            .iter()
            .map(|n| NetworkZone::new(&n.zone, &n.network_id))
            .collect()
    }

    pub fn fallthrough(&self) -> Fallthrough {
        match &self.fallthrough {
            Some(zones) => Fallthrough::enabled(zones.clone()),
            None => Fallthrough::disabled(),
        }
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs)
    }
}

fn default_refresh_secs() -> u64 {
    60
}

fn default_record_ttl_secs() -> u32 {
    30
}
