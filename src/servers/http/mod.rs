//! HTTP tracker server.
//!
//! An [`axum`] application serving the `BitTorrent` HTTP tracker protocol
//! (version `v1`, BEP 3 with the BEP 23 compact extension), plus a JSON status
//! listing of every swarm and a health check.
//!
//! Several instances can run at the same time, one per `[[http_trackers]]`
//! entry. They share the swarm registry.
pub mod container;
pub mod server;
pub mod v1;
