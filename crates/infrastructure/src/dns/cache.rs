//! Concurrency-safe record store: one immutable snapshot, swapped wholesale.

use std::collections::HashMap;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::Arc;

use arc_swap::ArcSwap;

pub type Ipv4Records = HashMap<String, Vec<Ipv4Addr>>;
pub type Ipv6Records = HashMap<String, Vec<Ipv6Addr>>;

#[derive(Debug, Default)]
struct Snapshot {
    v4: Ipv4Records,
    v6: Ipv6Records,
}

/// In-memory FQDN-to-address store for the query path.
///
/// Never mutated incrementally: each refresh builds a complete mapping pair
/// off to the side and installs it with a single atomic swap. In-flight
/// lookups that captured the previous snapshot keep reading it unharmed;
/// no reader ever observes a partially built snapshot or a mixed pair.
#[derive(Debug, Default)]
pub struct RecordCache {
    snapshot: ArcSwap<Snapshot>,
}

impl RecordCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a new mapping pair as the current snapshot. `None` clears
    /// that family.
    pub fn replace(&self, v4: Option<Ipv4Records>, v6: Option<Ipv6Records>) {
        self.snapshot.store(Arc::new(Snapshot {
            v4: v4.unwrap_or_default(),
            v6: v6.unwrap_or_default(),
        }));
    }

    /// Case-insensitive A lookup. The returned list is an owned copy;
    /// mutating it never affects cache state.
    pub fn lookup_a(&self, fqdn: &str) -> Option<Vec<Ipv4Addr>> {
        self.snapshot.load().v4.get(&fqdn.to_lowercase()).cloned()
    }

    /// Case-insensitive AAAA lookup, same copy-out contract as `lookup_a`.
    pub fn lookup_aaaa(&self, fqdn: &str) -> Option<Vec<Ipv6Addr>> {
        self.snapshot.load().v6.get(&fqdn.to_lowercase()).cloned()
    }

    /// Number of names per family, for refresh logging.
    pub fn name_counts(&self) -> (usize, usize) {
        let snap = self.snapshot.load();
        (snap.v4.len(), snap.v6.len())
    }
}
