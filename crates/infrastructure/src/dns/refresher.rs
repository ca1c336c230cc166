//! Background task rebuilding the record cache from ZTNET membership data.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use ztnet_dns_application::{build_zone_records, MembershipProvider, ZoneRecords};
use ztnet_dns_domain::NetworkZone;

use super::cache::{Ipv4Records, Ipv6Records, RecordCache};

/// Periodic refresh orchestrator.
///
/// Runs one cycle immediately, then one per interval. Within a cycle every
/// zone is fetched and built concurrently; results are merged sequentially
/// on the orchestrator task and installed with a single `replace`, so the
/// query path flips between complete snapshots. A failed zone is logged and
/// contributes nothing that cycle: its previously served names drop out of
/// the cache until a later cycle succeeds.
pub struct RecordRefresher {
    cache: Arc<RecordCache>,
    provider: Arc<dyn MembershipProvider>,
    zones: Vec<NetworkZone>,
    interval: Duration,
}

/// Running refresh task. `shutdown` cancels the loop and joins it, so a
/// cycle in flight finishes applying before the handle resolves.
pub struct RefresherHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl RefresherHandle {
    pub async fn shutdown(self) {
        self.cancel.cancel();
        if let Err(e) = self.task.await {
            error!(error = %e, "refresh task failed to join");
        }
    }
}

impl RecordRefresher {
    pub fn new(
        cache: Arc<RecordCache>,
        provider: Arc<dyn MembershipProvider>,
        zones: Vec<NetworkZone>,
        interval: Duration,
    ) -> Self {
        Self {
            cache,
            provider,
            zones,
            interval,
        }
    }

    /// Spawn the refresh loop.
    pub fn start(self) -> RefresherHandle {
        let cancel = CancellationToken::new();
        let loop_cancel = cancel.clone();

        let task = tokio::spawn(async move {
            info!(
                zones = self.zones.len(),
                interval_secs = self.interval.as_secs(),
                "record refresher started"
            );

            self.refresh_cycle().await;

            let mut ticker = tokio::time::interval(self.interval);
            ticker.tick().await; // consume the immediate first tick

            loop {
                tokio::select! {
                    _ = loop_cancel.cancelled() => {
                        debug!("record refresher shutting down");
                        return;
                    }
                    _ = ticker.tick() => {
                        self.refresh_cycle().await;
                    }
                }
            }
        });

        RefresherHandle { cancel, task }
    }

    /// Run one full refresh cycle and install the result.
    pub async fn refresh_cycle(&self) {
        let tasks: Vec<_> = self
            .zones
            .iter()
            .cloned()
            .map(|zone| {
                let provider = Arc::clone(&self.provider);
                tokio::spawn(async move { fetch_zone(provider, zone).await })
            })
            .collect();

        let mut v4 = Ipv4Records::new();
        let mut v6 = Ipv6Records::new();

        for outcome in join_all(tasks).await {
            match outcome {
                Ok(Some(records)) => merge_zone(&mut v4, &mut v6, records),
                Ok(None) => {} // failure already logged by fetch_zone
                Err(e) => error!(error = %e, "zone refresh task panicked"),
            }
        }

        let (a_names, aaaa_names) = (v4.len(), v6.len());
        self.cache.replace(Some(v4), Some(v6));
        debug!(a_names, aaaa_names, "record cache replaced");
    }
}

/// Fetch one zone's assignment modes and members, then build its records.
/// Any failure skips the whole zone for this cycle.
async fn fetch_zone(
    provider: Arc<dyn MembershipProvider>,
    zone: NetworkZone,
) -> Option<ZoneRecords> {
    let (info, members) = tokio::join!(
        provider.network_info(zone.network_id()),
        provider.members(zone.network_id()),
    );

    let info = match info {
        Ok(info) => info,
        Err(e) => {
            warn!(zone = %zone.zone(), error = %e, "network info fetch failed, zone skipped this cycle");
            return None;
        }
    };
    let members = match members {
        Ok(members) => members,
        Err(e) => {
            warn!(zone = %zone.zone(), error = %e, "member fetch failed, zone skipped this cycle");
            return None;
        }
    };

    Some(build_zone_records(&zone, &info, &members))
}

/// Union per key; duplicate keys across zones concatenate their lists.
fn merge_zone(v4: &mut Ipv4Records, v6: &mut Ipv6Records, records: ZoneRecords) {
    for (name, ips) in records.a {
        v4.entry(name).or_default().extend(ips);
    }
    for (name, ips) in records.aaaa {
        v6.entry(name).or_default().extend(ips);
    }
}
