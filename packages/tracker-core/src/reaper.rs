//! Inactive peer reaper.
//!
//! Peers are not required to say goodbye. A peer that has not announced for
//! longer than the announce interval is considered gone:
//!
//! ```text
//! cutoff = now - announce_interval
//! remove the peer if last_announce < cutoff
//! ```
//!
//! The sweep scans every swarm and removes stale peers one at a time. A peer
//! that re-announces while the sweep is running either survives or is removed
//! and then re-inserted by its next announce; both are fine. A failed removal
//! is logged and the sweep goes on with the next peer.
use std::sync::Arc;
use std::time::Duration;

use swarm_tracker_clock::clock::Time;
use swarm_tracker_clock::conv::convert_from_timestamp_to_datetime_utc;
use swarm_tracker_configuration::AnnouncePolicy;
use swarm_tracker_primitives::DurationSinceUnixEpoch;
use swarm_tracker_registry::registry::Registry;

use crate::{CurrentClock, REAPER_LOG_TARGET};

/// Summary of one sweep.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReapReport {
    pub swarms_scanned: u64,
    pub peers_removed: u64,
    pub removal_failures: u64,
    /// The swarm scan broke off before reaching the end.
    pub scan_interrupted: bool,
}

pub struct Reaper {
    registry: Arc<Registry>,
    announce_policy: AnnouncePolicy,
}

impl Reaper {
    #[must_use]
    pub fn new(registry: &Arc<Registry>, announce_policy: AnnouncePolicy) -> Self {
        Self {
            registry: registry.clone(),
            announce_policy,
        }
    }

    /// Runs one sweep using the current time.
    pub async fn reap(&self) -> ReapReport {
        self.reap_at(CurrentClock::now()).await
    }

    /// Runs one sweep as if the current time were `now`.
    pub async fn reap_at(&self, now: DurationSinceUnixEpoch) -> ReapReport {
        let expiry_window = Duration::from_secs(u64::from(self.announce_policy.interval));

        self.remove_peers_inactive_since(now.saturating_sub(expiry_window)).await
    }

    /// Removes every peer whose last announce is strictly older than `cutoff`.
    pub async fn remove_peers_inactive_since(&self, cutoff: DurationSinceUnixEpoch) -> ReapReport {
        tracing::info!(
            target: REAPER_LOG_TARGET,
            cutoff = %convert_from_timestamp_to_datetime_utc(cutoff),
            "Removing inactive peers ..."
        );

        let mut report = ReapReport::default();

        let mut scan = match self.registry.scan_all().await {
            Ok(scan) => scan,
            Err(err) => {
                tracing::error!(target: REAPER_LOG_TARGET, "Could not start the swarm scan: {err}");
                report.scan_interrupted = true;
                return report;
            }
        };

        loop {
            let swarm = match scan.next().await {
                Ok(Some(swarm)) => swarm,
                Ok(None) => break,
                Err(err) => {
                    tracing::error!(target: REAPER_LOG_TARGET, "The swarm scan broke off: {err}");
                    report.scan_interrupted = true;
                    break;
                }
            };

            report.swarms_scanned += 1;

            for (peer_id, entry) in &swarm.peers {
                if !entry.is_inactive_since(cutoff) {
                    continue;
                }

                match self.registry.remove_peer(&swarm.info_hash, peer_id).await {
                    Ok(()) => report.peers_removed += 1,
                    Err(err) => {
                        tracing::warn!(
                            target: REAPER_LOG_TARGET,
                            info_hash = %swarm.info_hash,
                            peer_id = %peer_id,
                            "Failed to remove inactive peer: {err}"
                        );
                        report.removal_failures += 1;
                    }
                }
            }
        }

        tracing::info!(
            target: REAPER_LOG_TARGET,
            swarms_scanned = report.swarms_scanned,
            peers_removed = report.peers_removed,
            removal_failures = report.removal_failures,
            scan_interrupted = report.scan_interrupted,
            "Inactive peers removed"
        );

        report
    }
}
