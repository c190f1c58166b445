//! Scrape handler.
//!
//! For every requested info-hash the tracker knows, the scrape returns:
//!
//! - `complete`: peers with nothing left to download (seeders).
//! - `downloaded`: how many `completed` announces the swarm has seen.
//! - `incomplete`: peers still downloading (leechers).
//!
//! Unknown info-hashes are left out of the result.
//!
//! A scrape without any info-hash returns every swarm only when the
//! deployment enables `all_swarms_without_info_hash`. Otherwise it returns
//! no files at all.
use std::sync::Arc;

use bittorrent_primitives::info_hash::InfoHash;
use swarm_tracker_configuration::Core;
use swarm_tracker_primitives::core::ScrapeData;
use swarm_tracker_registry::registry::Registry;

use crate::error::ScrapeError;

pub struct ScrapeHandler {
    config: Arc<Core>,
    registry: Arc<Registry>,
}

impl ScrapeHandler {
    #[must_use]
    pub fn new(config: &Arc<Core>, registry: &Arc<Registry>) -> Self {
        Self {
            config: config.clone(),
            registry: registry.clone(),
        }
    }

    /// Returns the statistics of the requested swarms.
    ///
    /// # Errors
    ///
    /// Will return a [`ScrapeError`] if the registry cannot be read.
    pub async fn handle_scrape(&self, info_hashes: &[InfoHash]) -> Result<ScrapeData, ScrapeError> {
        if info_hashes.is_empty() {
            if self.config.scrape_policy.all_swarms_without_info_hash {
                return self.scrape_all_swarms().await;
            }

            return Ok(ScrapeData::empty());
        }

        let mut scrape_data = ScrapeData::empty();

        for info_hash in info_hashes {
            if let Some(swarm_metadata) = self.registry.get_swarm_metadata(info_hash).await? {
                scrape_data.add_file(info_hash, swarm_metadata);
            }
        }

        Ok(scrape_data)
    }

    async fn scrape_all_swarms(&self) -> Result<ScrapeData, ScrapeError> {
        let mut scrape_data = ScrapeData::empty();

        let mut scan = self.registry.scan_all().await?;

        while let Some(swarm) = scan.next().await? {
            scrape_data.add_file(&swarm.info_hash, swarm.metadata());
        }

        Ok(scrape_data)
    }
}
