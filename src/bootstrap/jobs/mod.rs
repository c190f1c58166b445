//! Application jobs launchers.
//!
//! The main application setup has only two main stages:
//!
//! 1. Setup the domain layer: the swarm registry and the tracker core.
//! 2. Launch the application services as concurrent jobs.
//!
//! Jobs:
//!
//! - [`http_tracker`]: one per `[[http_trackers]]` entry.
//! - [`swarm_reaper`]: removes inactive peers every
//!   `inactive_peer_cleanup_interval` seconds.
//!
//! Every job listens to the shared cancellation token of the
//! [`manager::JobManager`].
pub mod http_tracker;
pub mod manager;
pub mod swarm_reaper;
