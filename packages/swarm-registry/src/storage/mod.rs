//! The storage contract behind the swarm registry.
//!
//! The registry never reads a whole swarm, modifies it and writes it back.
//! Backends only have to offer these single-record atomic primitives:
//!
//! - `get_swarm`: read one swarm (peers and `completed` counter).
//! - `put_if_absent`: create a swarm unless it already exists.
//! - `update_peer`: set or delete one peer of one swarm (keyed write).
//! - `atomic_increment`: add to a swarm counter without a read-modify-write.
//! - `scan_swarms`: iterate over all swarms.
//!
//! Each primitive is atomic on its own. There are no multi-record
//! transactions: the result of concurrent calls on the same key is
//! last-write-wins at the storage level.
//!
//! Implementations are synchronous. The [`Registry`](crate::registry::Registry)
//! runs them on the blocking thread pool.
pub mod error;
pub mod in_memory;
pub mod setup;
pub mod sqlite;

use bittorrent_primitives::info_hash::InfoHash;
use mockall::automock;
use swarm_tracker_primitives::peer::{PeerEntry, PeerId};
use swarm_tracker_primitives::swarm::Swarm;

pub use self::error::Error;

/// A lazy, finite sequence of swarm snapshots.
///
/// The order is unspecified. A new call to `scan_swarms` starts over.
pub type SwarmIter = Box<dyn Iterator<Item = Swarm> + Send>;

/// A keyed write on one peer of one swarm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeerUpdate {
    /// Insert the peer or fully replace its previous entry.
    Upsert(PeerEntry),
    /// Delete the peer. Deleting a missing peer is not an error.
    Tombstone,
}

/// Swarm counters that can be atomically incremented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counter {
    /// Number of `event=completed` announces.
    Completed,
}

/// The storage contract.
///
/// Both writes on peers and counter increments on a swarm that was never
/// created implicitly create it, so a racing `put_if_absent` can never lose
/// data.
#[automock]
pub trait SwarmStorage: Sync + Send {
    /// Returns the swarm, or `None` when the info-hash was never announced.
    ///
    /// # Errors
    ///
    /// Will return an `Error` if the backend could not be read.
    fn get_swarm(&self, info_hash: &InfoHash) -> Result<Option<Swarm>, Error>;

    /// Stores `swarm` unless a swarm with the same info-hash already exists.
    ///
    /// Returns `true` when this call created it. When two callers race, exactly
    /// one gets `true` and both observe the same stored swarm afterwards.
    ///
    /// # Errors
    ///
    /// Will return an `Error` if the backend could not be written.
    fn put_if_absent(&self, swarm: Swarm) -> Result<bool, Error>;

    /// Sets or deletes a single peer of a swarm.
    ///
    /// # Errors
    ///
    /// Will return an `Error` if the backend could not be written.
    fn update_peer(&self, info_hash: &InfoHash, peer_id: &PeerId, update: PeerUpdate) -> Result<(), Error>;

    /// Atomically adds `delta` to a swarm counter.
    ///
    /// # Errors
    ///
    /// Will return an `Error` if the backend could not be written.
    fn atomic_increment(&self, info_hash: &InfoHash, counter: Counter, delta: u64) -> Result<(), Error>;

    /// Returns a lazy iterator over all stored swarms.
    ///
    /// # Errors
    ///
    /// Will return an `Error` if the scan could not be started.
    fn scan_swarms(&self) -> Result<SwarmIter, Error>;
}
