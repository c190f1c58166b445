//! Job that runs a task on intervals to remove inactive peers.
//!
//! Every `inactive_peer_cleanup_interval` seconds it sweeps all the swarms and
//! removes the peers that have not announced within the announce interval.
//! See [`Reaper`] for the details.
//!
//! An interval of `0` disables the job. The `reap` command runs a single
//! sweep instead, for deployments that schedule it themselves.
use std::sync::Arc;
use std::time::Duration;

use bittorrent_tracker_core::reaper::Reaper;
use bittorrent_tracker_core::REAPER_LOG_TARGET;
use swarm_tracker_configuration::Core;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// It starts a job for removing inactive peers.
///
/// The first sweep runs one full interval after the start.
#[must_use]
pub fn start_job(config: &Core, reaper: &Arc<Reaper>, cancellation_token: CancellationToken) -> JoinHandle<()> {
    let weak_reaper = Arc::downgrade(reaper);
    let interval = config.inactive_peer_cleanup_interval;

    tokio::spawn(async move {
        let interval = Duration::from_secs(interval);
        let mut interval = tokio::time::interval(interval);
        interval.tick().await;

        loop {
            tokio::select! {
                () = cancellation_token.cancelled() => {
                    tracing::info!(target: REAPER_LOG_TARGET, "Stopping swarm reaper job..");
                    break;
                }
                _ = interval.tick() => {
                    if let Some(reaper) = weak_reaper.upgrade() {
                        tracing::info!(target: REAPER_LOG_TARGET, "Reaping inactive peers ...");

                        let report = reaper.reap().await;

                        tracing::info!(
                            target: REAPER_LOG_TARGET,
                            swarms_scanned = report.swarms_scanned,
                            peers_removed = report.peers_removed,
                            "Reaped inactive peers"
                        );
                    } else {
                        break;
                    }
                }
            }
        }
    })
}
