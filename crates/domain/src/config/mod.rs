//! Configuration for ztnet-dns
//!
//! Structures organized by concern:
//! - `root`: main configuration, loading, CLI overrides
//! - `server`: listen address and ports
//! - `ztnet`: controller endpoint, monitored networks, refresh/TTL knobs
//! - `logging`: logging settings
//! - `errors`: configuration errors

pub mod errors;
pub mod logging;
pub mod root;
pub mod server;
pub mod ztnet;

pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
pub use ztnet::{NetworkZoneConfig, ZtnetConfig};
