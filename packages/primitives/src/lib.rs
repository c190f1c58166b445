//! Primitive types for the swarm tracker.
//!
//! This module contains the basic data structures shared by the registry, the
//! protocol handlers and the HTTP delivery layer:
//!
//! - [`peer::PeerId`] and [`peer::PeerEntry`]: one participant in a swarm.
//! - [`swarm::Swarm`]: the set of peers for one info-hash plus its download
//!   counter.
//! - [`swarm_metadata::SwarmMetadata`]: the scrape statistics for one swarm.
//! - [`announce_event::AnnounceEvent`]: the `event` of an announce.
//! - [`core`]: what the announce and scrape handlers return.
//!
//! The info-hash type comes from the `bittorrent-primitives` crate.
pub mod announce_event;
pub mod core;
pub mod peer;
pub mod swarm;
pub mod swarm_metadata;

use std::time::Duration;

/// Duration since the Unix Epoch.
pub type DurationSinceUnixEpoch = Duration;

/// Number of bytes reported by a peer (`uploaded`, `downloaded`, `left`).
pub type NumberOfBytes = u64;
