//! The swarm registry: the async facade over the swarm storage.
//!
//! Every operation runs its storage primitives on tokio's blocking pool and is
//! bounded by the request timeout. Operations that can be safely repeated
//! (`ensure_swarm`, `upsert_peer`, `remove_peer` and the reads) are retried
//! once after a transient error. `increment_completed` is never retried: a
//! retry after an ambiguous failure could count the same completion twice.
use std::collections::VecDeque;
use std::panic::Location;
use std::sync::Arc;
use std::time::Duration;

use bittorrent_primitives::info_hash::InfoHash;
use swarm_tracker_primitives::peer::{PeerEntry, PeerId};
use swarm_tracker_primitives::swarm::Swarm;
use swarm_tracker_primitives::swarm_metadata::SwarmMetadata;
use tokio::time::timeout;

use crate::storage::{Counter, Error, PeerUpdate, SwarmIter, SwarmStorage};
use crate::SWARM_REGISTRY_LOG_TARGET;

/// Number of swarms loaded per blocking call while scanning.
const SCAN_BATCH_SIZE: usize = 64;

pub struct Registry {
    storage: Arc<Box<dyn SwarmStorage>>,
    request_timeout: Duration,
}

impl Registry {
    #[must_use]
    pub fn new(storage: &Arc<Box<dyn SwarmStorage>>, request_timeout: Duration) -> Self {
        Self {
            storage: storage.clone(),
            request_timeout,
        }
    }

    /// Returns the swarm, creating an empty one if the info-hash is new.
    ///
    /// Concurrent first-time calls never produce two different swarms: the
    /// storage's conditional put picks one winner and every caller reads it
    /// back.
    ///
    /// # Errors
    ///
    /// Will return a storage `Error` if both attempts fail.
    pub async fn ensure_swarm(&self, info_hash: &InfoHash) -> Result<Swarm, Error> {
        let info_hash = *info_hash;

        self.run_idempotent("ensure_swarm", move |storage| {
            if let Some(swarm) = storage.get_swarm(&info_hash)? {
                return Ok(swarm);
            }

            storage.put_if_absent(Swarm::empty(info_hash))?;

            Ok(storage
                .get_swarm(&info_hash)?
                .unwrap_or_else(|| Swarm::empty(info_hash)))
        })
        .await
    }

    /// Sets `peers[peer_id] = entry`, creating the swarm if needed.
    ///
    /// Only the one peer is written; the rest of the swarm is untouched.
    ///
    /// # Errors
    ///
    /// Will return a storage `Error` if both attempts fail.
    pub async fn upsert_peer(&self, info_hash: &InfoHash, peer_id: &PeerId, entry: PeerEntry) -> Result<(), Error> {
        let info_hash = *info_hash;
        let peer_id = peer_id.clone();

        self.run_idempotent("upsert_peer", move |storage| {
            storage.put_if_absent(Swarm::empty(info_hash))?;
            storage.update_peer(&info_hash, &peer_id, PeerUpdate::Upsert(entry))
        })
        .await
    }

    /// Deletes one peer. Removing a peer that is not there succeeds.
    ///
    /// # Errors
    ///
    /// Will return a storage `Error` if both attempts fail.
    pub async fn remove_peer(&self, info_hash: &InfoHash, peer_id: &PeerId) -> Result<(), Error> {
        let info_hash = *info_hash;
        let peer_id = peer_id.clone();

        self.run_idempotent("remove_peer", move |storage| {
            storage.update_peer(&info_hash, &peer_id, PeerUpdate::Tombstone)
        })
        .await
    }

    /// Adds one to the swarm's `completed` counter with the storage's atomic
    /// increment.
    ///
    /// # Errors
    ///
    /// Will return a storage `Error` if the increment fails. It is not retried.
    pub async fn increment_completed(&self, info_hash: &InfoHash) -> Result<(), Error> {
        let info_hash = *info_hash;

        self.run("increment_completed", move |storage| {
            storage.atomic_increment(&info_hash, Counter::Completed, 1)
        })
        .await
    }

    /// A snapshot of the swarm's peers. Empty when the swarm does not exist.
    ///
    /// # Errors
    ///
    /// Will return a storage `Error` if both attempts fail.
    pub async fn list_peers(&self, info_hash: &InfoHash) -> Result<Vec<(PeerId, PeerEntry)>, Error> {
        Ok(self
            .get_swarm(info_hash)
            .await?
            .map(|swarm| swarm.peer_list())
            .unwrap_or_default())
    }

    /// # Errors
    ///
    /// Will return a storage `Error` if both attempts fail.
    pub async fn get_swarm(&self, info_hash: &InfoHash) -> Result<Option<Swarm>, Error> {
        let info_hash = *info_hash;

        self.run_idempotent("get_swarm", move |storage| storage.get_swarm(&info_hash))
            .await
    }

    /// The scrape statistics of one swarm, or `None` for an unknown info-hash.
    ///
    /// # Errors
    ///
    /// Will return a storage `Error` if both attempts fail.
    pub async fn get_swarm_metadata(&self, info_hash: &InfoHash) -> Result<Option<SwarmMetadata>, Error> {
        Ok(self.get_swarm(info_hash).await?.map(|swarm| swarm.metadata()))
    }

    /// Starts a lazy scan over all the swarms.
    ///
    /// # Errors
    ///
    /// Will return a storage `Error` if the scan cannot be started.
    pub async fn scan_all(&self) -> Result<SwarmScan, Error> {
        let source = self.run_idempotent("scan_swarms", |storage| storage.scan_swarms()).await?;

        Ok(SwarmScan::new(source, self.request_timeout))
    }

    async fn run<T, F>(&self, operation: &'static str, task: F) -> Result<T, Error>
    where
        T: Send + 'static,
        F: FnOnce(&dyn SwarmStorage) -> Result<T, Error> + Send + 'static,
    {
        let storage = self.storage.clone();

        let handle = tokio::task::spawn_blocking(move || task(&**storage));

        match timeout(self.request_timeout, handle).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_error)) => Err(Error::TaskFailed {
                operation,
                reason: join_error.to_string(),
                location: Location::caller(),
            }),
            Err(_elapsed) => Err(Error::Timeout {
                operation,
                timeout: self.request_timeout,
                location: Location::caller(),
            }),
        }
    }

    async fn run_idempotent<T, F>(&self, operation: &'static str, task: F) -> Result<T, Error>
    where
        T: Send + 'static,
        F: Fn(&dyn SwarmStorage) -> Result<T, Error> + Clone + Send + 'static,
    {
        match self.run(operation, task.clone()).await {
            Err(error) if error.is_transient() => {
                tracing::warn!(target: SWARM_REGISTRY_LOG_TARGET, operation, "retrying after transient storage error: {error}");

                self.run(operation, task).await
            }
            result => result,
        }
    }
}

/// A lazy scan over all the swarms.
///
/// Swarms are pulled from the storage in small batches on the blocking pool.
/// The scan is finite; start a new one with [`Registry::scan_all`] to see
/// swarms created afterwards.
pub struct SwarmScan {
    source: Option<SwarmIter>,
    buffer: VecDeque<Swarm>,
    request_timeout: Duration,
}

impl SwarmScan {
    fn new(source: SwarmIter, request_timeout: Duration) -> Self {
        Self {
            source: Some(source),
            buffer: VecDeque::new(),
            request_timeout,
        }
    }

    /// The next swarm, or `None` when the scan is over.
    ///
    /// # Errors
    ///
    /// Will return a storage `Error` if loading the next batch fails or times
    /// out. The scan is over after an error.
    pub async fn next(&mut self) -> Result<Option<Swarm>, Error> {
        if let Some(swarm) = self.buffer.pop_front() {
            return Ok(Some(swarm));
        }

        let Some(mut source) = self.source.take() else {
            return Ok(None);
        };

        let handle = tokio::task::spawn_blocking(move || {
            let batch: Vec<Swarm> = source.by_ref().take(SCAN_BATCH_SIZE).collect();
            (batch, source)
        });

        let (batch, source) = match timeout(self.request_timeout, handle).await {
            Ok(Ok(loaded)) => loaded,
            Ok(Err(join_error)) => {
                return Err(Error::TaskFailed {
                    operation: "scan_swarms",
                    reason: join_error.to_string(),
                    location: Location::caller(),
                })
            }
            Err(_elapsed) => {
                return Err(Error::Timeout {
                    operation: "scan_swarms",
                    timeout: self.request_timeout,
                    location: Location::caller(),
                })
            }
        };

        if batch.len() == SCAN_BATCH_SIZE {
            self.source = Some(source);
        }

        self.buffer.extend(batch);

        Ok(self.buffer.pop_front())
    }

    /// Drains the scan into a vector.
    ///
    /// # Errors
    ///
    /// Will return a storage `Error` if any batch fails to load.
    pub async fn collect(mut self) -> Result<Vec<Swarm>, Error> {
        let mut swarms = Vec::new();

        while let Some(swarm) = self.next().await? {
            swarms.push(swarm);
        }

        Ok(swarms)
    }
}
