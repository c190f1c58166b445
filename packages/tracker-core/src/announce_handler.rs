//! Announce handler.
//!
//! The announce request is the only way a peer enters, updates or leaves a
//! swarm. The handler dispatches on the announce event, in this order:
//!
//! | Event       | Registry effect                                  | Response       |
//! |-------------|--------------------------------------------------|----------------|
//! | `stopped`   | `remove_peer`                                    | empty          |
//! | `completed` | `increment_completed`, then the regular path     | peer list      |
//! | `started`   | regular path                                     | peer list      |
//! | none        | regular path                                     | peer list      |
//!
//! The regular path stamps the peer with the current time, writes it to the
//! swarm and returns a snapshot of the other peers together with the swarm
//! statistics.
//!
//! The number of returned peers is the smallest of what the client asked for
//! (`numwant`) and the configured `max_peers`. When the swarm has more peers
//! than that, the list is a window over the swarm that starts at a random
//! peer and wraps around. Whether the announcing peer can appear in its own
//! peer list is a configuration choice (`exclude_requesting_peer`), matched
//! by peer ID.
//!
//! A repeated `started` announce is not an error: the peer entry is replaced
//! and its `last_announce` moves forward.
use std::cmp::min;
use std::net::IpAddr;
use std::sync::Arc;

use bittorrent_primitives::info_hash::InfoHash;
use rand::Rng;
use swarm_tracker_clock::clock::Time;
use swarm_tracker_configuration::Core;
use swarm_tracker_primitives::announce_event::AnnounceEvent;
use swarm_tracker_primitives::core::AnnounceData;
use swarm_tracker_primitives::peer::{PeerEntry, PeerId};
use swarm_tracker_primitives::swarm::Swarm;
use swarm_tracker_primitives::{DurationSinceUnixEpoch, NumberOfBytes};
use swarm_tracker_registry::registry::Registry;

use crate::error::AnnounceError;
use crate::CurrentClock;

/// A validated announce, with the peer IP already resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Announcement {
    pub peer_id: PeerId,
    pub ip: IpAddr,
    pub port: u16,
    pub uploaded: NumberOfBytes,
    pub downloaded: NumberOfBytes,
    pub left: NumberOfBytes,
    pub event: AnnounceEvent,
}

impl Announcement {
    /// The peer entry stored for this announce.
    #[must_use]
    pub fn to_entry(&self, now: DurationSinceUnixEpoch) -> PeerEntry {
        PeerEntry {
            ip: self.ip,
            port: self.port,
            uploaded: self.uploaded,
            downloaded: self.downloaded,
            left: self.left,
            last_announce: now,
        }
    }
}

/// How many peers the client wants in the response.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PeersWanted {
    /// The client did not say. It gets up to the configured maximum.
    #[default]
    AsManyAsPossible,
    /// The client asked for at most `amount` peers (`numwant`).
    Only { amount: usize },
}

impl PeersWanted {
    #[must_use]
    pub fn only(limit: u32) -> Self {
        Self::Only {
            amount: usize::try_from(limit).unwrap_or(usize::MAX),
        }
    }

    fn limit(&self, max_peers: usize) -> usize {
        match self {
            Self::AsManyAsPossible => max_peers,
            Self::Only { amount } => min(*amount, max_peers),
        }
    }
}

impl From<Option<u32>> for PeersWanted {
    fn from(numwant: Option<u32>) -> Self {
        numwant.map_or(Self::AsManyAsPossible, Self::only)
    }
}

/// What happened to the announce.
#[derive(Clone, Debug, PartialEq)]
pub enum AnnounceOutcome {
    /// The peer left the swarm. The client gets an empty response.
    Stopped,
    /// The peer is in the swarm. The client gets a peer list.
    Announced(AnnounceData),
}

pub struct AnnounceHandler {
    config: Arc<Core>,
    registry: Arc<Registry>,
}

impl AnnounceHandler {
    #[must_use]
    pub fn new(config: &Arc<Core>, registry: &Arc<Registry>) -> Self {
        Self {
            config: config.clone(),
            registry: registry.clone(),
        }
    }

    /// Applies the announce to the swarm.
    ///
    /// # Errors
    ///
    /// Will return an [`AnnounceError`] if any registry operation fails or
    /// exceeds the request budget. The whole announce fails: a `completed`
    /// event whose increment failed does not go on to update the peer.
    pub async fn handle_announcement(
        &self,
        info_hash: &InfoHash,
        announcement: &Announcement,
        peers_wanted: &PeersWanted,
    ) -> Result<AnnounceOutcome, AnnounceError> {
        match announcement.event {
            AnnounceEvent::Stopped => {
                self.registry.remove_peer(info_hash, &announcement.peer_id).await?;

                return Ok(AnnounceOutcome::Stopped);
            }
            AnnounceEvent::Completed => {
                self.registry.increment_completed(info_hash).await?;
            }
            AnnounceEvent::Started | AnnounceEvent::None => {}
        }

        let entry = announcement.to_entry(CurrentClock::now());

        self.registry
            .upsert_peer(info_hash, &announcement.peer_id, entry)
            .await?;

        let swarm = self
            .registry
            .get_swarm(info_hash)
            .await?
            .unwrap_or_else(|| Swarm::empty(*info_hash));

        let peers = self.select_peers(&swarm, &announcement.peer_id, peers_wanted);

        Ok(AnnounceOutcome::Announced(AnnounceData::new(
            peers,
            swarm.metadata(),
            self.config.announce_policy,
        )))
    }

    fn select_peers(&self, swarm: &Swarm, requester: &PeerId, peers_wanted: &PeersWanted) -> Vec<(PeerId, PeerEntry)> {
        let policy = &self.config.peer_selection;

        let candidates: Vec<_> = swarm
            .peers
            .iter()
            .filter(|(peer_id, _)| !(policy.exclude_requesting_peer && *peer_id == requester))
            .collect();

        let limit = peers_wanted.limit(policy.max_peers).min(candidates.len());

        // Random start, wrapping around the end of the swarm.
        let start = if limit < candidates.len() {
            rand::rng().random_range(0..candidates.len())
        } else {
            0
        };

        candidates
            .iter()
            .cycle()
            .skip(start)
            .take(limit)
            .map(|(peer_id, entry)| ((*peer_id).clone(), **entry))
            .collect()
    }
}

#[cfg(test)]
mod tests {

    mod the_announce_handler {
        use std::sync::Arc;
        use std::time::Duration;

        use swarm_tracker_clock::clock;
        use swarm_tracker_clock::clock::stopped::Stopped as _;
        use swarm_tracker_configuration::Core;
        use swarm_tracker_primitives::announce_event::AnnounceEvent;
        use swarm_tracker_primitives::core::AnnounceData;
        use swarm_tracker_primitives::peer::fixture::PeerBuilder;
        use swarm_tracker_primitives::swarm_metadata::SwarmMetadata;
        use swarm_tracker_registry::registry::Registry;

        use crate::announce_handler::{AnnounceHandler, AnnounceOutcome, PeersWanted};
        use crate::test_helpers::tests::{announcement, ephemeral_core_config, in_memory_registry, sample_info_hash};

        fn announce_handler() -> (AnnounceHandler, Arc<Registry>) {
            announce_handler_with(&ephemeral_core_config())
        }

        fn announce_handler_with(config: &Arc<Core>) -> (AnnounceHandler, Arc<Registry>) {
            let registry = in_memory_registry();
            (AnnounceHandler::new(config, &registry), registry)
        }

        fn announced(outcome: AnnounceOutcome) -> AnnounceData {
            match outcome {
                AnnounceOutcome::Announced(announce_data) => announce_data,
                AnnounceOutcome::Stopped => panic!("expected a peer list, got a stopped announce"),
            }
        }

        #[tokio::test]
        async fn it_should_add_the_announcing_peer_to_the_swarm() {
            let (handler, registry) = announce_handler();
            let (peer_id, entry) = PeerBuilder::seeder().build();

            handler
                .handle_announcement(
                    &sample_info_hash(),
                    &announcement(&peer_id, &entry, AnnounceEvent::Started),
                    &PeersWanted::AsManyAsPossible,
                )
                .await
                .unwrap();

            let peers = registry.list_peers(&sample_info_hash()).await.unwrap();

            assert_eq!(peers.len(), 1);
            assert_eq!(peers[0].0, peer_id);
        }

        #[tokio::test]
        async fn it_should_stamp_the_peer_with_the_current_time() {
            clock::Stopped::local_set(&Duration::from_secs(1_700_000_000));

            let (handler, registry) = announce_handler();
            let (peer_id, entry) = PeerBuilder::seeder().build();

            handler
                .handle_announcement(
                    &sample_info_hash(),
                    &announcement(&peer_id, &entry, AnnounceEvent::Started),
                    &PeersWanted::AsManyAsPossible,
                )
                .await
                .unwrap();

            let peers = registry.list_peers(&sample_info_hash()).await.unwrap();

            assert_eq!(peers[0].1.last_announce, Duration::from_secs(1_700_000_000));
        }

        #[tokio::test]
        async fn it_should_return_the_swarm_statistics_and_the_announce_policy() {
            let (handler, _registry) = announce_handler();
            let (peer_id, entry) = PeerBuilder::seeder().build();

            let announce_data = announced(
                handler
                    .handle_announcement(
                        &sample_info_hash(),
                        &announcement(&peer_id, &entry, AnnounceEvent::Started),
                        &PeersWanted::AsManyAsPossible,
                    )
                    .await
                    .unwrap(),
            );

            assert_eq!(
                announce_data,
                AnnounceData {
                    peers: vec![],
                    stats: SwarmMetadata {
                        downloaded: 0,
                        complete: 1,
                        incomplete: 0
                    },
                    policy: ephemeral_core_config().announce_policy,
                }
            );
        }

        #[tokio::test]
        async fn it_should_return_the_other_peers_in_the_swarm() {
            let (handler, _registry) = announce_handler();
            let (seeder_id, seeder) = PeerBuilder::seeder().build();
            let (leecher_id, leecher) = PeerBuilder::leecher().build();

            handler
                .handle_announcement(
                    &sample_info_hash(),
                    &announcement(&seeder_id, &seeder, AnnounceEvent::Started),
                    &PeersWanted::AsManyAsPossible,
                )
                .await
                .unwrap();

            let announce_data = announced(
                handler
                    .handle_announcement(
                        &sample_info_hash(),
                        &announcement(&leecher_id, &leecher, AnnounceEvent::Started),
                        &PeersWanted::AsManyAsPossible,
                    )
                    .await
                    .unwrap(),
            );

            let peer_ids: Vec<_> = announce_data.peers.into_iter().map(|(peer_id, _)| peer_id).collect();

            assert_eq!(peer_ids, vec![seeder_id]);
            assert_eq!(announce_data.stats.complete, 1);
            assert_eq!(announce_data.stats.incomplete, 1);
        }

        #[tokio::test]
        async fn it_should_include_the_announcing_peer_when_self_exclusion_is_disabled() {
            let mut config = Core::default();
            config.peer_selection.exclude_requesting_peer = false;

            let (handler, _registry) = announce_handler_with(&Arc::new(config));
            let (peer_id, entry) = PeerBuilder::seeder().build();

            let announce_data = announced(
                handler
                    .handle_announcement(
                        &sample_info_hash(),
                        &announcement(&peer_id, &entry, AnnounceEvent::Started),
                        &PeersWanted::AsManyAsPossible,
                    )
                    .await
                    .unwrap(),
            );

            assert_eq!(announce_data.peers.len(), 1);
        }

        #[tokio::test]
        async fn it_should_keep_a_single_entry_with_a_newer_timestamp_on_a_repeated_started_announce() {
            clock::Stopped::local_set(&Duration::from_secs(1_700_000_000));

            let (handler, registry) = announce_handler();
            let (peer_id, entry) = PeerBuilder::leecher().build();
            let started = announcement(&peer_id, &entry, AnnounceEvent::Started);

            handler
                .handle_announcement(&sample_info_hash(), &started, &PeersWanted::AsManyAsPossible)
                .await
                .unwrap();

            clock::Stopped::local_add(&Duration::from_secs(60)).unwrap();

            handler
                .handle_announcement(&sample_info_hash(), &started, &PeersWanted::AsManyAsPossible)
                .await
                .unwrap();

            let peers = registry.list_peers(&sample_info_hash()).await.unwrap();

            assert_eq!(peers.len(), 1);
            assert_eq!(peers[0].1.last_announce, Duration::from_secs(1_700_000_060));
        }

        #[tokio::test]
        async fn it_should_remove_only_the_calling_peer_on_a_stopped_announce() {
            let (handler, registry) = announce_handler();
            let (seeder_id, seeder) = PeerBuilder::seeder().build();
            let (leecher_id, leecher) = PeerBuilder::leecher().build();

            for (peer_id, entry) in [(&seeder_id, &seeder), (&leecher_id, &leecher)] {
                handler
                    .handle_announcement(
                        &sample_info_hash(),
                        &announcement(peer_id, entry, AnnounceEvent::Started),
                        &PeersWanted::AsManyAsPossible,
                    )
                    .await
                    .unwrap();
            }

            let outcome = handler
                .handle_announcement(
                    &sample_info_hash(),
                    &announcement(&leecher_id, &leecher, AnnounceEvent::Stopped),
                    &PeersWanted::AsManyAsPossible,
                )
                .await
                .unwrap();

            assert_eq!(outcome, AnnounceOutcome::Stopped);

            let peers = registry.list_peers(&sample_info_hash()).await.unwrap();

            assert_eq!(peers.len(), 1);
            assert_eq!(peers[0].0, seeder_id);
        }

        #[tokio::test]
        async fn it_should_accept_a_stopped_announce_from_an_unknown_peer() {
            let (handler, _registry) = announce_handler();
            let (peer_id, entry) = PeerBuilder::seeder().build();

            let outcome = handler
                .handle_announcement(
                    &sample_info_hash(),
                    &announcement(&peer_id, &entry, AnnounceEvent::Stopped),
                    &PeersWanted::AsManyAsPossible,
                )
                .await
                .unwrap();

            assert_eq!(outcome, AnnounceOutcome::Stopped);
        }

        #[tokio::test]
        async fn it_should_count_the_download_and_keep_the_peer_on_a_completed_announce() {
            let (handler, _registry) = announce_handler();
            let (peer_id, entry) = PeerBuilder::seeder().build();

            let announce_data = announced(
                handler
                    .handle_announcement(
                        &sample_info_hash(),
                        &announcement(&peer_id, &entry, AnnounceEvent::Completed),
                        &PeersWanted::AsManyAsPossible,
                    )
                    .await
                    .unwrap(),
            );

            assert_eq!(announce_data.stats.downloads(), 1);
            assert_eq!(announce_data.stats.seeders(), 1);
        }

        #[tokio::test]
        async fn it_should_not_count_a_download_on_a_regular_announce() {
            let (handler, _registry) = announce_handler();
            let (peer_id, entry) = PeerBuilder::seeder().build();

            let announce_data = announced(
                handler
                    .handle_announcement(
                        &sample_info_hash(),
                        &announcement(&peer_id, &entry, AnnounceEvent::None),
                        &PeersWanted::AsManyAsPossible,
                    )
                    .await
                    .unwrap(),
            );

            assert_eq!(announce_data.stats.downloads(), 0);
        }

        mod selecting_peers {
            use std::collections::HashSet;
            use std::sync::Arc;

            use swarm_tracker_configuration::Core;
            use swarm_tracker_primitives::announce_event::AnnounceEvent;
            use swarm_tracker_primitives::peer::fixture::PeerBuilder;

            use super::{announce_handler_with, announced};
            use crate::announce_handler::{AnnounceHandler, PeersWanted};
            use crate::test_helpers::tests::{announcement, sample_info_hash};

            async fn populate(handler: &AnnounceHandler, number_of_peers: u8) {
                for i in 0..number_of_peers {
                    let (peer_id, entry) = PeerBuilder::leecher()
                        .with_peer_id(&[b'-', b'q', b'B', i])
                        .build();

                    handler
                        .handle_announcement(
                            &sample_info_hash(),
                            &announcement(&peer_id, &entry, AnnounceEvent::Started),
                            &PeersWanted::AsManyAsPossible,
                        )
                        .await
                        .unwrap();
                }
            }

            async fn peers_returned_to_a_new_peer(handler: &AnnounceHandler, peers_wanted: PeersWanted) -> usize {
                let (peer_id, entry) = PeerBuilder::seeder().build();

                announced(
                    handler
                        .handle_announcement(
                            &sample_info_hash(),
                            &announcement(&peer_id, &entry, AnnounceEvent::Started),
                            &peers_wanted,
                        )
                        .await
                        .unwrap(),
                )
                .peers
                .len()
            }

            #[tokio::test]
            async fn it_should_return_at_most_the_configured_maximum_number_of_peers() {
                let mut config = Core::default();
                config.peer_selection.max_peers = 10;

                let (handler, _registry) = announce_handler_with(&Arc::new(config));
                populate(&handler, 20).await;

                assert_eq!(peers_returned_to_a_new_peer(&handler, PeersWanted::AsManyAsPossible).await, 10);
            }

            #[tokio::test]
            async fn it_should_return_at_most_the_number_of_peers_the_client_wants() {
                let (handler, _registry) = announce_handler_with(&Arc::new(Core::default()));
                populate(&handler, 20).await;

                assert_eq!(peers_returned_to_a_new_peer(&handler, PeersWanted::only(5)).await, 5);
            }

            #[tokio::test]
            async fn it_should_not_exceed_the_configured_maximum_even_if_the_client_wants_more() {
                let mut config = Core::default();
                config.peer_selection.max_peers = 10;

                let (handler, _registry) = announce_handler_with(&Arc::new(config));
                populate(&handler, 20).await;

                assert_eq!(peers_returned_to_a_new_peer(&handler, PeersWanted::only(100)).await, 10);
            }

            #[tokio::test]
            async fn it_should_not_hand_the_same_peers_to_every_client_when_the_swarm_is_larger_than_numwant() {
                let (handler, _registry) = announce_handler_with(&Arc::new(Core::default()));
                populate(&handler, 3).await;

                let (peer_id, entry) = PeerBuilder::seeder().build();
                let mut returned_peer_ids = HashSet::new();

                for _ in 0..100 {
                    let announce_data = announced(
                        handler
                            .handle_announcement(
                                &sample_info_hash(),
                                &announcement(&peer_id, &entry, AnnounceEvent::Started),
                                &PeersWanted::only(1),
                            )
                            .await
                            .unwrap(),
                    );

                    assert_eq!(announce_data.peers.len(), 1);
                    assert_ne!(announce_data.peers[0].0, peer_id);

                    returned_peer_ids.insert(announce_data.peers[0].0.clone());
                }

                assert!(returned_peer_ids.len() > 1);
            }

            #[tokio::test]
            async fn it_should_return_every_other_peer_when_they_all_fit() {
                let (handler, _registry) = announce_handler_with(&Arc::new(Core::default()));
                populate(&handler, 3).await;

                assert_eq!(peers_returned_to_a_new_peer(&handler, PeersWanted::only(3)).await, 3);
            }

            #[tokio::test]
            async fn it_should_return_no_peers_when_the_client_wants_none() {
                let (handler, _registry) = announce_handler_with(&Arc::new(Core::default()));
                populate(&handler, 3).await;

                assert_eq!(peers_returned_to_a_new_peer(&handler, PeersWanted::only(0)).await, 0);
            }
        }
    }

    mod when_the_storage_fails {
        use std::io;
        use std::sync::Arc;

        use swarm_tracker_configuration::Driver;
        use swarm_tracker_located_error::DynError;
        use swarm_tracker_primitives::announce_event::AnnounceEvent;
        use swarm_tracker_primitives::peer::fixture::PeerBuilder;
        use swarm_tracker_registry::storage::{self, MockSwarmStorage};

        use crate::announce_handler::{AnnounceHandler, PeersWanted};
        use crate::error::AnnounceError;
        use crate::test_helpers::tests::{announcement, ephemeral_core_config, registry_on, sample_info_hash};

        fn query_error() -> storage::Error {
            storage::Error::Query {
                source: (Arc::new(io::Error::other("disk I/O error")) as DynError).into(),
                driver: Driver::Sqlite3,
            }
        }

        #[tokio::test]
        async fn it_should_fail_the_announce_without_updating_the_peer_when_the_download_count_fails() {
            let mut storage = MockSwarmStorage::new();
            storage
                .expect_atomic_increment()
                .times(1)
                .returning(|_, _, _| Err(query_error()));
            storage.expect_update_peer().never();

            let handler = AnnounceHandler::new(&ephemeral_core_config(), &registry_on(Box::new(storage)));
            let (peer_id, entry) = PeerBuilder::seeder().build();

            let result = handler
                .handle_announcement(
                    &sample_info_hash(),
                    &announcement(&peer_id, &entry, AnnounceEvent::Completed),
                    &PeersWanted::AsManyAsPossible,
                )
                .await;

            assert!(matches!(result, Err(AnnounceError::Registry { .. })));
        }

        #[tokio::test]
        async fn it_should_fail_the_announce_when_the_peer_cannot_be_removed() {
            let mut storage = MockSwarmStorage::new();
            storage.expect_update_peer().times(1).returning(|_, _, _| Err(query_error()));

            let handler = AnnounceHandler::new(&ephemeral_core_config(), &registry_on(Box::new(storage)));
            let (peer_id, entry) = PeerBuilder::seeder().build();

            let result = handler
                .handle_announcement(
                    &sample_info_hash(),
                    &announcement(&peer_id, &entry, AnnounceEvent::Stopped),
                    &PeersWanted::AsManyAsPossible,
                )
                .await;

            assert!(matches!(result, Err(AnnounceError::Registry { .. })));
        }
    }
}
