use thiserror::Error;

use crate::errors::DomainError;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },

    #[error("ztnet.endpoint is required")]
    MissingEndpoint,

    #[error("ztnet.token is required (or set ZTNET_API_TOKEN)")]
    MissingToken,

    #[error("at least one [[ztnet.networks]] entry is required")]
    NoNetworks,

    #[error("invalid network entry: {0}")]
    InvalidNetwork(#[from] DomainError),

    #[error("ztnet.refresh_secs must be greater than zero")]
    ZeroRefreshInterval,
}
