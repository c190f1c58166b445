use std::sync::Arc;
use std::time::Duration;

use swarm_tracker_configuration::Storage;

use crate::registry::Registry;
use crate::storage::setup::initialize_storage;
use crate::storage::SwarmStorage;

pub struct SwarmRegistryContainer {
    pub storage: Arc<Box<dyn SwarmStorage>>,
    pub registry: Arc<Registry>,
}

impl SwarmRegistryContainer {
    /// # Panics
    ///
    /// Will panic if the configured storage backend cannot be initialized.
    #[must_use]
    pub fn initialize(config: &Storage) -> Self {
        let storage = initialize_storage(config);

        let registry = Arc::new(Registry::new(&storage, Duration::from_millis(config.request_timeout_ms)));

        Self { storage, registry }
    }
}
