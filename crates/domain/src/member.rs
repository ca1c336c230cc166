use std::net::Ipv4Addr;

/// IPv6 assignment modes a network has enabled, as reported per network by
/// the ZTNET controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetworkInfo {
    pub rfc4193: bool,
    pub six_plane: bool,
}

/// An authorized member of a ZeroTier network, normalized for DNS use.
///
/// Produced fresh on every refresh cycle: the id is a lowercase 10-hex-digit
/// node identifier, the display name has spaces replaced with underscores,
/// and only successfully parsed IPv4 assignments are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: String,
    pub name: String,
    pub ipv4: Vec<Ipv4Addr>,
}
