use std::sync::Arc;

use bittorrent_primitives::info_hash::InfoHash;
use bittorrent_tracker_core::announce_handler::{AnnounceOutcome, Announcement, PeersWanted};
use bittorrent_tracker_core::container::TrackerCoreContainer;
use bittorrent_tracker_core::reaper::ReapReport;
use swarm_tracker_configuration::Core;
use swarm_tracker_primitives::core::{AnnounceData, ScrapeData};
use swarm_tracker_primitives::peer::{PeerEntry, PeerId};
use swarm_tracker_primitives::swarm_metadata::SwarmMetadata;
use swarm_tracker_primitives::DurationSinceUnixEpoch;

pub struct TestEnv {
    pub tracker_core_container: Arc<TrackerCoreContainer>,
}

impl TestEnv {
    #[must_use]
    pub fn new(core_config: &Arc<Core>) -> Self {
        Self {
            tracker_core_container: Arc::new(TrackerCoreContainer::initialize(core_config)),
        }
    }

    pub async fn announce(&self, announcement: &Announcement, info_hash: &InfoHash) -> AnnounceOutcome {
        self.tracker_core_container
            .announce_handler
            .handle_announcement(info_hash, announcement, &PeersWanted::AsManyAsPossible)
            .await
            .unwrap()
    }

    pub async fn announce_and_expect_peer_list(&self, announcement: &Announcement, info_hash: &InfoHash) -> AnnounceData {
        match self.announce(announcement, info_hash).await {
            AnnounceOutcome::Announced(announce_data) => announce_data,
            AnnounceOutcome::Stopped => panic!("expected a peer list, got a stopped announce"),
        }
    }

    pub async fn scrape(&self, info_hashes: &[InfoHash]) -> ScrapeData {
        self.tracker_core_container
            .scrape_handler
            .handle_scrape(info_hashes)
            .await
            .unwrap()
    }

    pub async fn reap_at(&self, now: DurationSinceUnixEpoch) -> ReapReport {
        self.tracker_core_container.reaper.reap_at(now).await
    }

    pub async fn add_peer(&self, info_hash: &InfoHash, peer_id: &PeerId, entry: PeerEntry) {
        self.tracker_core_container
            .registry
            .upsert_peer(info_hash, peer_id, entry)
            .await
            .unwrap();
    }

    pub async fn list_peers(&self, info_hash: &InfoHash) -> Vec<(PeerId, PeerEntry)> {
        self.tracker_core_container.registry.list_peers(info_hash).await.unwrap()
    }

    pub async fn get_swarm_metadata(&self, info_hash: &InfoHash) -> Option<SwarmMetadata> {
        self.tracker_core_container
            .registry
            .get_swarm_metadata(info_hash)
            .await
            .unwrap()
    }
}
