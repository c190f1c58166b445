use std::sync::Arc;

use bittorrent_tracker_core::announce_handler::AnnounceHandler;
use bittorrent_tracker_core::container::TrackerCoreContainer;
use bittorrent_tracker_core::scrape_handler::ScrapeHandler;
use swarm_tracker_configuration::{Core, HttpTracker};
use swarm_tracker_registry::registry::Registry;

/// The services shared by the handlers of one HTTP tracker instance.
pub struct HttpTrackerContainer {
    pub http_tracker_config: Arc<HttpTracker>,
    pub core_config: Arc<Core>,
    pub registry: Arc<Registry>,
    pub announce_handler: Arc<AnnounceHandler>,
    pub scrape_handler: Arc<ScrapeHandler>,
}

impl HttpTrackerContainer {
    /// Builds an instance with its own swarm registry.
    ///
    /// # Panics
    ///
    /// Will panic if the configured storage backend cannot be initialized.
    #[must_use]
    pub fn initialize(core_config: &Arc<Core>, http_tracker_config: &Arc<HttpTracker>) -> Self {
        let tracker_core_container = Arc::new(TrackerCoreContainer::initialize(core_config));

        Self::initialize_from(http_tracker_config, &tracker_core_container)
    }

    #[must_use]
    pub fn initialize_from(http_tracker_config: &Arc<HttpTracker>, tracker_core_container: &Arc<TrackerCoreContainer>) -> Self {
        Self {
            http_tracker_config: http_tracker_config.clone(),
            core_config: tracker_core_container.core_config.clone(),
            registry: tracker_core_container.registry.clone(),
            announce_handler: tracker_core_container.announce_handler.clone(),
            scrape_handler: tracker_core_container.scrape_handler.clone(),
        }
    }

    /// Seconds clients are told to wait, also sent along failures.
    #[must_use]
    pub fn announce_interval(&self) -> u32 {
        self.core_config.announce_policy.interval
    }
}
