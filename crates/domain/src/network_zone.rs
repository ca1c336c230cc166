use crate::errors::DomainError;

/// A DNS zone paired with the ZeroTier network that backs it.
///
/// Construction canonicalizes the zone to a lowercase FQDN with exactly one
/// trailing dot and lowercases the network identifier, so later comparisons
/// are plain string operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkZone {
    zone: String,
    network_id: String,
}

impl NetworkZone {
    pub fn new(zone: &str, network_id: &str) -> Result<Self, DomainError> {
        let zone_lower = zone.to_lowercase();
        if !is_valid_zone(&zone_lower) {
            return Err(DomainError::InvalidZoneName(zone.to_string()));
        }

        let network_id = network_id.to_lowercase();
        if network_id.len() != 16 || !network_id.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(DomainError::InvalidNetworkId(network_id));
        }

        let mut zone = zone_lower.trim_end_matches('.').to_string();
        zone.push('.');
        Ok(Self { zone, network_id })
    }

    /// Canonical zone name: lowercase, trailing dot.
    pub fn zone(&self) -> &str {
        &self.zone
    }

    /// 16-hex-digit lowercase network identifier.
    pub fn network_id(&self) -> &str {
        &self.network_id
    }
}

/// Zone names must have at least two labels and an alphabetic TLD of two or
/// more characters; labels follow hostname rules (alphanumeric with interior
/// hyphens, 63 characters max).
fn is_valid_zone(zone: &str) -> bool {
    let zone = zone.strip_suffix('.').unwrap_or(zone);
    let labels: Vec<&str> = zone.split('.').collect();
    let Some((tld, rest)) = labels.split_last() else {
        return false;
    };
    if rest.is_empty() {
        return false;
    }
    if tld.len() < 2 || !tld.bytes().all(|b| b.is_ascii_lowercase()) {
        return false;
    }

    rest.iter().all(|label| is_valid_label(label))
}

fn is_valid_label(label: &str) -> bool {
    let bytes = label.as_bytes();
    if bytes.is_empty() || bytes.len() > 63 {
        return false;
    }
    let alnum = |b: u8| b.is_ascii_lowercase() || b.is_ascii_digit();
    if !alnum(bytes[0]) || !alnum(bytes[bytes.len() - 1]) {
        return false;
    }
    bytes.iter().all(|&b| alnum(b) || b == b'-')
}
