//! Results returned by the tracker core handlers.
use std::collections::BTreeMap;

use bittorrent_primitives::info_hash::InfoHash;
use derive_more::Constructor;
use swarm_tracker_configuration::AnnouncePolicy;

use crate::peer::{PeerEntry, PeerId};
use crate::swarm_metadata::SwarmMetadata;

/// What the tracker replies to an accepted announce.
#[derive(Clone, Debug, PartialEq, Constructor)]
pub struct AnnounceData {
    /// The selected peers, without the announcing one if so configured.
    pub peers: Vec<(PeerId, PeerEntry)>,
    /// Statistics of the whole swarm, not only of the selected peers.
    pub stats: SwarmMetadata,
    pub policy: AnnouncePolicy,
}

/// Scrape statistics keyed by info-hash. Unknown info-hashes are absent.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct ScrapeData {
    pub files: BTreeMap<InfoHash, SwarmMetadata>,
}

impl ScrapeData {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn add_file(&mut self, info_hash: &InfoHash, swarm_metadata: SwarmMetadata) {
        self.files.insert(*info_hash, swarm_metadata);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
