use std::fs;

use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use super::ztnet::ZtnetConfig;

/// Main configuration, loaded from TOML with CLI overrides applied on top
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub ztnet: ZtnetConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings the CLI may override regardless of the config file
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub bind_address: Option<String>,
}

impl Config {
    /// Load configuration from an optional TOML file and apply CLI overrides.
    ///
    /// An empty token falls back to the ZTNET_API_TOKEN environment variable.
    /// Call `validate()` before using the result.
    pub fn load(path: Option<&str>, overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.to_string(),
                    source,
                })?;
                toml::from_str(&raw).map_err(|source| ConfigError::Parse {
                    path: path.to_string(),
                    source,
                })?
            }
            None => Config::default(),
        };

        if let Some(port) = overrides.dns_port {
            config.server.dns_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            config.server.bind_address = bind;
        }

        if config.ztnet.token.is_empty() {
            if let Ok(token) = std::env::var("ZTNET_API_TOKEN") {
                config.ztnet.token = token;
            }
        }

        Ok(config)
    }

    /// Reject configurations the server must not start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ztnet.endpoint.is_empty() {
            return Err(ConfigError::MissingEndpoint);
        }
        if self.ztnet.token.is_empty() {
            return Err(ConfigError::MissingToken);
        }
        if self.ztnet.networks.is_empty() {
            return Err(ConfigError::NoNetworks);
        }
        self.ztnet.network_zones()?;
        if self.ztnet.refresh_secs == 0 {
            return Err(ConfigError::ZeroRefreshInterval);
        }
        Ok(())
    }
}
