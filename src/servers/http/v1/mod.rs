//! Version `v1` of the HTTP tracker.
pub mod extractors;
pub mod handlers;
pub mod routes;
