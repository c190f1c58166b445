//! `Scrape` response for the HTTP tracker.
//!
//! ```text
//! d5:filesd20:<info-hash bytes>d8:completei1e10:downloadedi0e10:incompletei0eeee
//! ```
//!
//! Keys of `files` are the raw 20-byte info-hashes. Info-hashes the tracker
//! does not know are absent, so an unknown-hash scrape is `d5:filesdee`.
use swarm_tracker_contrib_bencode::{ben_map, Value};
use swarm_tracker_primitives::core::ScrapeData;

use super::ben_count;

/// The `Scrape` response for the HTTP tracker.
#[derive(Debug, PartialEq, Default)]
pub struct Bencoded {
    scrape_data: ScrapeData,
}

impl Bencoded {
    /// Returns the bencoded representation of the `Scrape` response.
    #[must_use]
    pub fn body(&self) -> Vec<u8> {
        let files = self
            .scrape_data
            .files
            .iter()
            .map(|(info_hash, swarm_metadata)| {
                (
                    info_hash.bytes().to_vec(),
                    ben_map! {
                        "complete" => ben_count(swarm_metadata.complete),
                        "downloaded" => ben_count(swarm_metadata.downloaded),
                        "incomplete" => ben_count(swarm_metadata.incomplete)
                    },
                )
            })
            .collect();

        ben_map! {
            "files" => Value::Dict(files)
        }
        .encode()
    }
}

impl From<ScrapeData> for Bencoded {
    fn from(scrape_data: ScrapeData) -> Self {
        Self { scrape_data }
    }
}
