//! Read-only listing of every swarm, served on the tracker home page.
use serde::Serialize;
use swarm_tracker_primitives::swarm::Swarm;
use swarm_tracker_registry::registry::Registry;
use swarm_tracker_registry::storage;

/// One row of the status listing.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SwarmStatus {
    /// Hex-encoded info-hash.
    pub info_hash: String,
    pub peer_count: u64,
    pub completed: u64,
}

impl From<&Swarm> for SwarmStatus {
    fn from(swarm: &Swarm) -> Self {
        Self {
            info_hash: swarm.info_hash.to_hex_string(),
            peer_count: u64::try_from(swarm.len()).unwrap_or(u64::MAX),
            completed: swarm.completed,
        }
    }
}

/// Lists every swarm ordered by info-hash.
///
/// # Errors
///
/// Will return a storage `Error` if the swarm scan fails.
pub async fn get_swarms_status(registry: &Registry) -> Result<Vec<SwarmStatus>, storage::Error> {
    let mut statuses = Vec::new();

    let mut scan = registry.scan_all().await?;

    while let Some(swarm) = scan.next().await? {
        statuses.push(SwarmStatus::from(&swarm));
    }

    statuses.sort_by(|a, b| a.info_hash.cmp(&b.info_hash));

    Ok(statuses)
}
