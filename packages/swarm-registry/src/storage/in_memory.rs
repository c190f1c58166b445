//! In-process swarm storage.
//!
//! Swarms live in a lock-free [`SkipMap`] keyed by info-hash. Each swarm holds
//! its own `SkipMap` of peers and an [`AtomicU64`] download counter, so every
//! storage primitive maps onto a single atomic operation:
//!
//! - `put_if_absent` → `SkipMap::get_or_insert`
//! - `update_peer` → `SkipMap::insert` / `SkipMap::remove` on the peer map
//! - `atomic_increment` → `AtomicU64::fetch_add`
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use bittorrent_primitives::info_hash::InfoHash;
use crossbeam_skiplist::SkipMap;
use swarm_tracker_primitives::peer::{PeerEntry, PeerId};
use swarm_tracker_primitives::swarm::Swarm;

use super::{Counter, Error, PeerUpdate, SwarmIter, SwarmStorage};

/// The peers and counters of one swarm.
#[derive(Debug, Default)]
struct SwarmRecord {
    peers: SkipMap<PeerId, PeerEntry>,
    completed: AtomicU64,
}

impl SwarmRecord {
    fn from_swarm(swarm: Swarm) -> Self {
        let record = Self {
            peers: SkipMap::new(),
            completed: AtomicU64::new(swarm.completed),
        };
        for (peer_id, entry) in swarm.peers {
            record.peers.insert(peer_id, entry);
        }
        record
    }

    fn snapshot(&self, info_hash: InfoHash) -> Swarm {
        Swarm {
            info_hash,
            peers: self
                .peers
                .iter()
                .map(|entry| (entry.key().clone(), *entry.value()))
                .collect(),
            completed: self.completed.load(Ordering::Acquire),
        }
    }
}

#[derive(Debug, Default)]
pub struct InMemorySwarmStorage {
    swarms: SkipMap<InfoHash, Arc<SwarmRecord>>,
}

impl InMemorySwarmStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the record for `info_hash`, creating an empty one if needed.
    fn record_or_insert(&self, info_hash: &InfoHash) -> Arc<SwarmRecord> {
        if let Some(entry) = self.swarms.get(info_hash) {
            return entry.value().clone();
        }

        self.swarms
            .get_or_insert_with(*info_hash, || Arc::new(SwarmRecord::default()))
            .value()
            .clone()
    }
}

impl SwarmStorage for InMemorySwarmStorage {
    fn get_swarm(&self, info_hash: &InfoHash) -> Result<Option<Swarm>, Error> {
        Ok(self.swarms.get(info_hash).map(|entry| entry.value().snapshot(*info_hash)))
    }

    fn put_if_absent(&self, swarm: Swarm) -> Result<bool, Error> {
        if self.swarms.contains_key(&swarm.info_hash) {
            return Ok(false);
        }

        let info_hash = swarm.info_hash;
        let candidate = Arc::new(SwarmRecord::from_swarm(swarm));

        let stored = self.swarms.get_or_insert(info_hash, candidate.clone());

        Ok(Arc::ptr_eq(stored.value(), &candidate))
    }

    fn update_peer(&self, info_hash: &InfoHash, peer_id: &PeerId, update: PeerUpdate) -> Result<(), Error> {
        match update {
            PeerUpdate::Upsert(entry) => {
                self.record_or_insert(info_hash).peers.insert(peer_id.clone(), entry);
            }
            PeerUpdate::Tombstone => {
                if let Some(record) = self.swarms.get(info_hash) {
                    record.value().peers.remove(peer_id);
                }
            }
        }

        Ok(())
    }

    fn atomic_increment(&self, info_hash: &InfoHash, counter: Counter, delta: u64) -> Result<(), Error> {
        let record = self.record_or_insert(info_hash);

        match counter {
            Counter::Completed => record.completed.fetch_add(delta, Ordering::AcqRel),
        };

        Ok(())
    }

    fn scan_swarms(&self) -> Result<SwarmIter, Error> {
        let records: Vec<(InfoHash, Arc<SwarmRecord>)> = self
            .swarms
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();

        Ok(Box::new(
            records.into_iter().map(|(info_hash, record)| record.snapshot(info_hash)),
        ))
    }
}
