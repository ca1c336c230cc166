//! Build one zone's name-to-address mappings from its membership data.

use std::collections::HashMap;
use std::net::{Ipv4Addr, Ipv6Addr};

use tracing::warn;
use ztnet_dns_domain::{ipv6, Member, NetworkInfo, NetworkZone};

/// A/AAAA mappings for one zone. Keys are canonical FQDNs (lowercase,
/// trailing dot); a key exists only if at least one address was appended.
#[derive(Debug, Default, Clone)]
pub struct ZoneRecords {
    pub a: HashMap<String, Vec<Ipv4Addr>>,
    pub aaaa: HashMap<String, Vec<Ipv6Addr>>,
}

/// Each member is published under two names, `<name>.<zone>` and
/// `<id>.<zone>`. IPv4 assignments go into the A map; RFC 4193 and 6PLANE
/// addresses are derived independently when the network enables them.
/// Address lists merge when distinct members collide on a derived name.
/// A derivation failure skips that member's affected family only.
pub fn build_zone_records(
    zone: &NetworkZone,
    info: &NetworkInfo,
    members: &[Member],
) -> ZoneRecords {
    let mut records = ZoneRecords::default();

    for member in members {
        let names = [
            canonical_name(&member.name, zone.zone()),
            canonical_name(&member.id, zone.zone()),
        ];

        for fqdn in names {
            if !member.ipv4.is_empty() {
                records
                    .a
                    .entry(fqdn.clone())
                    .or_default()
                    .extend(member.ipv4.iter().copied());
            }

            if info.rfc4193 {
                match ipv6::rfc4193(zone.network_id(), &member.id) {
                    Ok(ip) => records.aaaa.entry(fqdn.clone()).or_default().push(ip),
                    Err(e) => warn!(
                        zone = %zone.zone(),
                        member = %member.id,
                        error = %e,
                        "RFC 4193 derivation failed, member skipped"
                    ),
                }
            }

            if info.six_plane {
                match ipv6::six_plane(zone.network_id(), &member.id) {
                    Ok(ip) => records.aaaa.entry(fqdn.clone()).or_default().push(ip),
                    Err(e) => warn!(
                        zone = %zone.zone(),
                        member = %member.id,
                        error = %e,
                        "6PLANE derivation failed, member skipped"
                    ),
                }
            }
        }
    }

    records
}

/// `<label>.<zone>` lowercased, with exactly one trailing dot.
fn canonical_name(label: &str, zone: &str) -> String {
    let joined = format!("{label}.{zone}");
    let mut fqdn = joined.to_lowercase().trim_end_matches('.').to_string();
    fqdn.push('.');
    fqdn
}
