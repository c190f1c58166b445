use std::sync::Arc;

use swarm_tracker_configuration::Core;
use swarm_tracker_registry::container::SwarmRegistryContainer;
use swarm_tracker_registry::registry::Registry;

use crate::announce_handler::AnnounceHandler;
use crate::reaper::Reaper;
use crate::scrape_handler::ScrapeHandler;

pub struct TrackerCoreContainer {
    pub core_config: Arc<Core>,
    pub registry: Arc<Registry>,
    pub announce_handler: Arc<AnnounceHandler>,
    pub scrape_handler: Arc<ScrapeHandler>,
    pub reaper: Arc<Reaper>,
}

impl TrackerCoreContainer {
    /// # Panics
    ///
    /// Will panic if the configured storage backend cannot be initialized.
    #[must_use]
    pub fn initialize(core_config: &Arc<Core>) -> Self {
        let swarm_registry_container = Arc::new(SwarmRegistryContainer::initialize(&core_config.storage));

        Self::initialize_from(core_config, &swarm_registry_container)
    }

    #[must_use]
    pub fn initialize_from(core_config: &Arc<Core>, swarm_registry_container: &Arc<SwarmRegistryContainer>) -> Self {
        let registry = swarm_registry_container.registry.clone();

        let announce_handler = Arc::new(AnnounceHandler::new(core_config, &registry));
        let scrape_handler = Arc::new(ScrapeHandler::new(core_config, &registry));
        let reaper = Arc::new(Reaper::new(&registry, core_config.announce_policy));

        Self {
            core_config: core_config.clone(),
            registry,
            announce_handler,
            scrape_handler,
            reaper,
        }
    }
}
