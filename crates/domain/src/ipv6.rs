//! Deterministic IPv6 address derivation for ZeroTier nodes.
//!
//! Both schemes map an 8-byte network identifier and a 5-byte node identifier
//! to a fixed 16-byte layout. Identical inputs always produce identical
//! addresses; validation failures never return a partial address.

use std::net::Ipv6Addr;

use crate::errors::DomainError;

/// Compute the RFC 4193 unique-local address for a node.
///
/// Layout: `fd` | network[0..7] | network[7] | `99` `93` | node[0..5].
pub fn rfc4193(network_id: &str, node_id: &str) -> Result<Ipv6Addr, DomainError> {
    let nw = decode_hex::<8>(network_id, "network identifier")?;
    let node = decode_hex::<5>(node_id, "node identifier")?;

    let mut octets = [0u8; 16];
    octets[0] = 0xfd;
    octets[1..8].copy_from_slice(&nw[..7]);
    octets[8] = nw[7];
    octets[9] = 0x99;
    octets[10] = 0x93;
    octets[11..16].copy_from_slice(&node);
    Ok(Ipv6Addr::from(octets))
}

/// Compute the 6PLANE address for a node.
///
/// The network identifier is folded to 32 bits by XOR-ing its big-endian
/// upper and lower halves. Layout: `fc` | folded (BE) | node[0..5] | zeros | `01`.
pub fn six_plane(network_id: &str, node_id: &str) -> Result<Ipv6Addr, DomainError> {
    let nw = decode_hex::<8>(network_id, "network identifier")?;
    let node = decode_hex::<5>(node_id, "node identifier")?;

    let top = u32::from_be_bytes([nw[0], nw[1], nw[2], nw[3]]);
    let bottom = u32::from_be_bytes([nw[4], nw[5], nw[6], nw[7]]);
    let hashed = top ^ bottom;

    let mut octets = [0u8; 16];
    octets[0] = 0xfc;
    octets[1..5].copy_from_slice(&hashed.to_be_bytes());
    octets[5..10].copy_from_slice(&node);
    octets[15] = 0x01;
    Ok(Ipv6Addr::from(octets))
}

/// Decode exactly `N` bytes of hex, rejecting wrong lengths and non-hex input
/// with distinguishable errors.
fn decode_hex<const N: usize>(ident: &str, what: &'static str) -> Result<[u8; N], DomainError> {
    let bytes = ident.as_bytes();
    if bytes.len() != N * 2 {
        return Err(DomainError::InvalidIdentifierLength {
            what,
            expected: N * 2,
            actual: bytes.len(),
        });
    }

    let mut out = [0u8; N];
    for (i, pair) in bytes.chunks_exact(2).enumerate() {
        let hi = hex_value(pair[0]).ok_or(DomainError::InvalidIdentifierHex { what })?;
        let lo = hex_value(pair[1]).ok_or(DomainError::InvalidIdentifierHex { what })?;
        out[i] = (hi << 4) | lo;
    }
    Ok(out)
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
