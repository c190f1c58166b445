//! The delivery layer of the tracker.
pub mod http;
