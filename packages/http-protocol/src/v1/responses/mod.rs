//! Bencoded HTTP tracker responses.
//!
//! Every response is a bencoded dictionary sent with status `200 OK`, including
//! failures: BitTorrent clients read the `failure reason` key, not the HTTP
//! status.
pub mod announce;
pub mod error;
pub mod scrape;

use swarm_tracker_contrib_bencode::{ben_int, Value};

/// Counters are unsigned in the tracker and signed in bencode.
fn ben_count(count: u64) -> Value {
    ben_int!(i64::try_from(count).unwrap_or(i64::MAX))
}
