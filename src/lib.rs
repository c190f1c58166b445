//! **Swarm Tracker** is a `BitTorrent` HTTP tracker.
//!
//! A tracker keeps, for every torrent (identified by its info-hash), the
//! swarm of peers currently sharing it. Peers `announce` themselves to get the
//! other peers of the swarm, and clients `scrape` the tracker to get swarm
//! statistics without joining.
//!
//! # Architecture
//!
//! ```text
//!  HTTP (axum)            tracker core                 swarm registry
//! ┌──────────────┐     ┌──────────────────┐     ┌──────────────────────────┐
//! │ /announce    │ ──> │ AnnounceHandler  │ ──> │ Registry                 │
//! │ /scrape      │ ──> │ ScrapeHandler    │ ──> │  (async, request budget) │
//! │ /            │ ──> │ status listing   │ ──> │          │               │
//! └──────────────┘     │ Reaper (job)     │ ──> │ SwarmStorage             │
//!                      └──────────────────┘     │  in-memory | sqlite3     │
//!                                               └──────────────────────────┘
//! ```
//!
//! Request handlers share no lock. Every write is a single atomic storage
//! primitive: a conditional swarm insert, a keyed peer write or an atomic
//! counter increment. That is what makes concurrent announces to the same
//! swarm safe, with last-write-wins per `(info_hash, peer_id)`.
//!
//! # Running
//!
//! ```text
//! swarm-tracker --config ./share/default/config/tracker.development.toml
//! ```
//!
//! A single reaper sweep, for deployments that schedule it externally:
//!
//! ```text
//! swarm-tracker --config tracker.toml reap
//! ```
//!
//! See [`swarm_tracker_configuration`] for the configuration options.
//!
//! # Endpoints
//!
//! | Path            | Response                                              |
//! |-----------------|-------------------------------------------------------|
//! | `/announce`     | bencoded peer list (BEP 3, BEP 23 compact)            |
//! | `/scrape`       | bencoded swarm statistics                             |
//! | `/`             | JSON list of `{info_hash, peer_count, completed}`     |
//! | `/health_check` | JSON `{"status":"Ok"}`                                |
//!
//! Failures on `/announce` and `/scrape` are answered with `200 OK` and a
//! bencoded `failure reason`, which is what `BitTorrent` clients expect.
pub mod app;
pub mod bootstrap;
pub mod console;
pub mod container;
pub mod servers;

/// The log target used by the HTTP tracker server.
pub const HTTP_TRACKER_LOG_TARGET: &str = "HTTP TRACKER";
