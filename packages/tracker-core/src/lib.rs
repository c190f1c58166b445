//! The core `tracker` logic, independent of the delivery layer.
//!
//! The tracker core turns protocol-level requests into swarm registry
//! operations:
//!
//! - [`announce_handler::AnnounceHandler`]: applies the announce event
//!   semantics (`started`, `stopped`, `completed` or a regular keep-alive) and
//!   selects the peers returned to the client.
//! - [`scrape_handler::ScrapeHandler`]: aggregates swarm statistics for one or
//!   more info-hashes.
//! - [`reaper::Reaper`]: evicts peers that stopped announcing.
//! - [`status`]: a read-only listing of every swarm.
//!
//! Handlers never write the storage directly. Every mutation goes through the
//! [`Registry`](swarm_tracker_registry::registry::Registry), which in turn
//! relies on the storage atomic primitives. There is no lock shared between
//! requests.
//!
//! The HTTP delivery layer parses and validates requests, resolves the client
//! IP and renders the bencoded responses. None of that lives here.
pub mod announce_handler;
pub mod container;
pub mod error;
pub mod reaper;
pub mod scrape_handler;
pub mod status;

use swarm_tracker_clock::clock;

/// The log target used by the inactive peer reaper.
pub const REAPER_LOG_TARGET: &str = "REAPER";

/// This code needs to be copied into each crate.
/// Working version, for production.
#[cfg(not(test))]
#[allow(dead_code)]
pub(crate) type CurrentClock = clock::Working;

/// Stopped version, for testing.
#[cfg(test)]
#[allow(dead_code)]
pub(crate) type CurrentClock = clock::Stopped;
