//! A swarm: the peers sharing one torrent.
use std::collections::BTreeMap;

use bittorrent_primitives::info_hash::InfoHash;

use crate::peer::{PeerEntry, PeerId};
use crate::swarm_metadata::SwarmMetadata;

/// Snapshot of one swarm as read from storage.
///
/// A swarm is created lazily on its first announce and never deleted. It can
/// exist with no peers at all; the `completed` counter survives peer churn and
/// never decreases.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Swarm {
    pub info_hash: InfoHash,
    pub peers: BTreeMap<PeerId, PeerEntry>,
    pub completed: u64,
}

impl Swarm {
    /// A freshly created swarm: no peers and no completed downloads.
    #[must_use]
    pub fn empty(info_hash: InfoHash) -> Self {
        Self {
            info_hash,
            peers: BTreeMap::new(),
            completed: 0,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.peers.len()
    }

    #[must_use]
    pub fn is_peerless(&self) -> bool {
        self.peers.is_empty()
    }

    #[must_use]
    pub fn seeders(&self) -> u64 {
        self.peers.values().filter(|entry| entry.is_seeder()).count() as u64
    }

    #[must_use]
    pub fn leechers(&self) -> u64 {
        self.peers.values().filter(|entry| entry.is_leecher()).count() as u64
    }

    #[must_use]
    pub fn metadata(&self) -> SwarmMetadata {
        SwarmMetadata {
            downloaded: self.completed,
            complete: self.seeders(),
            incomplete: self.leechers(),
        }
    }

    /// The peers as an owned list, ordered by peer ID.
    #[must_use]
    pub fn peer_list(&self) -> Vec<(PeerId, PeerEntry)> {
        self.peers.iter().map(|(id, entry)| (id.clone(), *entry)).collect()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bittorrent_primitives::info_hash::InfoHash;

    use crate::peer::fixture::PeerBuilder;
    use crate::swarm::Swarm;
    use crate::swarm_metadata::SwarmMetadata;

    fn sample_info_hash() -> InfoHash {
        InfoHash::from_str("3b245504cf5f11bbdbe1201cea6a6bf45aee1bc0").expect("String should be a valid info hash") // DevSkim: ignore DS173237
    }

    #[test]
    fn it_should_start_with_no_peers_and_no_downloads() {
        let swarm = Swarm::empty(sample_info_hash());

        assert!(swarm.is_peerless());
        assert_eq!(swarm.metadata(), SwarmMetadata::zeroed());
    }

    #[test]
    fn it_should_classify_peers_by_the_bytes_left() {
        let mut swarm = Swarm::empty(sample_info_hash());

        for (peer_id, left) in [(b"seeder-1", 0), (b"seeder-2", 0), (b"leecher1", 5)] {
            let (id, entry) = PeerBuilder::default().with_peer_id(peer_id).with_bytes_left(left).build();
            swarm.peers.insert(id, entry);
        }
        swarm.completed = 7;

        assert_eq!(
            swarm.metadata(),
            SwarmMetadata {
                downloaded: 7,
                complete: 2,
                incomplete: 1
            }
        );
    }
}
