use std::sync::Arc;

use bittorrent_tracker_core::container::TrackerCoreContainer;
use swarm_tracker_configuration::{Configuration, Core, HttpTracker};
use swarm_tracker_registry::container::SwarmRegistryContainer;
use tracing::instrument;

use crate::servers::http::container::HttpTrackerContainer;

/// Every long lived service of the application.
///
/// All HTTP tracker instances share the same swarm registry, so a peer
/// announced on one listener is visible on every other.
pub struct AppContainer {
    pub core_config: Arc<Core>,
    pub swarm_registry_container: Arc<SwarmRegistryContainer>,
    pub tracker_core_container: Arc<TrackerCoreContainer>,
}

impl AppContainer {
    /// # Panics
    ///
    /// Will panic if the configured storage backend cannot be initialized.
    #[must_use]
    #[instrument(skip(configuration))]
    pub fn initialize(configuration: &Configuration) -> AppContainer {
        let core_config = Arc::new(configuration.core.clone());

        let swarm_registry_container = Arc::new(SwarmRegistryContainer::initialize(&core_config.storage));

        let tracker_core_container = Arc::new(TrackerCoreContainer::initialize_from(
            &core_config,
            &swarm_registry_container,
        ));

        AppContainer {
            core_config,
            swarm_registry_container,
            tracker_core_container,
        }
    }

    /// The services one HTTP tracker instance needs.
    #[must_use]
    pub fn http_tracker_container(&self, http_tracker_config: &HttpTracker) -> Arc<HttpTrackerContainer> {
        Arc::new(HttpTrackerContainer::initialize_from(
            &Arc::new(http_tracker_config.clone()),
            &self.tracker_core_container,
        ))
    }
}
