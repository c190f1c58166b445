use serde::{Deserialize, Serialize};

use super::network::Network;
use super::storage::Storage;

/// Core tracker configuration: the announce, peer-selection and scrape
/// policies, and the swarm storage backend.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Core {
    /// Interval in seconds between sweeps removing inactive peers. A value of
    /// `0` disables the periodic sweep (peers can still be reaped with the
    /// `reap` command).
    #[serde(default = "Core::default_inactive_peer_cleanup_interval")]
    pub inactive_peer_cleanup_interval: u64,

    /// Announce policy configuration.
    #[serde(default = "Core::default_announce_policy")]
    pub announce_policy: AnnouncePolicy,

    /// Peer selection configuration for announce responses.
    #[serde(default = "Core::default_peer_selection")]
    pub peer_selection: PeerSelection,

    /// Scrape configuration.
    #[serde(default = "Core::default_scrape_policy")]
    pub scrape_policy: ScrapePolicy,

    /// Swarm storage configuration.
    #[serde(default = "Core::default_storage")]
    pub storage: Storage,

    /// Network configuration.
    #[serde(default = "Core::default_network")]
    pub net: Network,
}

impl Default for Core {
    fn default() -> Self {
        Self {
            inactive_peer_cleanup_interval: Self::default_inactive_peer_cleanup_interval(),
            announce_policy: Self::default_announce_policy(),
            peer_selection: Self::default_peer_selection(),
            scrape_policy: Self::default_scrape_policy(),
            storage: Self::default_storage(),
            net: Self::default_network(),
        }
    }
}

impl Core {
    fn default_inactive_peer_cleanup_interval() -> u64 {
        1800
    }

    fn default_announce_policy() -> AnnouncePolicy {
        AnnouncePolicy::default()
    }

    fn default_peer_selection() -> PeerSelection {
        PeerSelection::default()
    }

    fn default_scrape_policy() -> ScrapePolicy {
        ScrapePolicy::default()
    }

    fn default_storage() -> Storage {
        Storage::default()
    }

    fn default_network() -> Network {
        Network::default()
    }
}

/// Announce policy.
///
/// The `interval` is also the expiry window: a peer that has not announced for
/// more than `interval` seconds is removed by the next sweep.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Copy)]
pub struct AnnouncePolicy {
    /// Interval in seconds that the client should wait between sending
    /// regular announce requests to the tracker.
    #[serde(default = "AnnouncePolicy::default_interval")]
    pub interval: u32,

    /// Minimum announce interval. Clients must not reannounce more frequently
    /// than this.
    #[serde(default = "AnnouncePolicy::default_interval_min")]
    pub interval_min: u32,
}

impl Default for AnnouncePolicy {
    fn default() -> Self {
        Self {
            interval: Self::default_interval(),
            interval_min: Self::default_interval_min(),
        }
    }
}

impl AnnouncePolicy {
    fn default_interval() -> u32 {
        1800
    }

    fn default_interval_min() -> u32 {
        900
    }
}

/// How the peer list in announce responses is built.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Copy)]
pub struct PeerSelection {
    /// Maximum number of peers returned. Clients can ask for fewer with
    /// `numwant` but never for more.
    #[serde(default = "PeerSelection::default_max_peers")]
    pub max_peers: usize,

    /// Whether the peer making the announce is left out of its own peer list.
    #[serde(default = "PeerSelection::default_exclude_requesting_peer")]
    pub exclude_requesting_peer: bool,
}

impl Default for PeerSelection {
    fn default() -> Self {
        Self {
            max_peers: Self::default_max_peers(),
            exclude_requesting_peer: Self::default_exclude_requesting_peer(),
        }
    }
}

impl PeerSelection {
    fn default_max_peers() -> usize {
        50
    }

    fn default_exclude_requesting_peer() -> bool {
        true
    }
}

/// Scrape policy.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Copy)]
pub struct ScrapePolicy {
    /// What a scrape without any `info_hash` returns: every known swarm when
    /// `true`, an empty `files` dictionary when `false`.
    #[serde(default = "ScrapePolicy::default_all_swarms_without_info_hash")]
    pub all_swarms_without_info_hash: bool,
}

impl Default for ScrapePolicy {
    fn default() -> Self {
        Self {
            all_swarms_without_info_hash: Self::default_all_swarms_without_info_hash(),
        }
    }
}

impl ScrapePolicy {
    fn default_all_swarms_without_info_hash() -> bool {
        false
    }
}
