//! ztnet-dns Domain Layer
pub mod config;
pub mod errors;
pub mod fallthrough;
pub mod ipv6;
pub mod member;
pub mod network_zone;

pub use config::{CliOverrides, Config, ConfigError};
pub use errors::DomainError;
pub use fallthrough::Fallthrough;
pub use member::{Member, NetworkInfo};
pub use network_zone::NetworkZone;
