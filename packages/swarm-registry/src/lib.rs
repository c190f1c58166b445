//! The swarm registry.
//!
//! The registry keeps, for every info-hash, the set of active peers and the
//! number of completed downloads. It is the only component that writes swarm
//! state. Announce, scrape and the reaper all go through it.
//!
//! There is no in-process lock. Concurrent requests on the same swarm are
//! serialised by the storage backend's own atomic primitives:
//!
//! | Registry operation      | Storage primitive                       |
//! |-------------------------|-----------------------------------------|
//! | `ensure_swarm`          | `get_swarm` + `put_if_absent`           |
//! | `upsert_peer`           | `update_peer(Upsert)` (one keyed write) |
//! | `remove_peer`           | `update_peer(Tombstone)`                |
//! | `increment_completed`   | `atomic_increment(Completed, 1)`        |
//! | `list_peers`            | `get_swarm`                             |
//! | `scan_all`              | `scan_swarms`                           |
//!
//! Two backends implement the [`storage::SwarmStorage`] contract:
//!
//! - [`storage::in_memory::InMemorySwarmStorage`]: lock-free skip maps.
//! - [`storage::sqlite::SqliteSwarmStorage`]: an `SQLite` file shared through
//!   an `r2d2` connection pool.
//!
//! Every registry call runs the (blocking) storage work on the blocking thread
//! pool and is bounded by the configured request timeout.
pub mod container;
pub mod registry;
pub mod storage;

/// The log target used by the registry and its storage backends.
pub const SWARM_REGISTRY_LOG_TARGET: &str = "SWARM_REGISTRY";
