use async_trait::async_trait;
use ztnet_dns_domain::{DomainError, Member, NetworkInfo};

/// Source of membership data for a ZeroTier network.
///
/// Implementations return members already normalized: authorized only,
/// lowercase node ids, underscored display names, parsed IPv4 addresses.
/// Per-call timeouts are the implementation's responsibility.
#[async_trait]
pub trait MembershipProvider: Send + Sync {
    /// IPv6 assignment modes for the network.
    async fn network_info(&self, network_id: &str) -> Result<NetworkInfo, DomainError>;

    /// Authorized members of the network.
    async fn members(&self, network_id: &str) -> Result<Vec<Member>, DomainError>;
}
