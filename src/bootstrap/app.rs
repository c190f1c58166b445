//! Setup for the main tracker application.
//!
//! Steps:
//!
//! 1. Load the configuration.
//! 2. Initialize the global services: static time and logging.
//! 3. Build the application container (storage backend, registry, handlers).
use swarm_tracker_clock::static_time;
use swarm_tracker_configuration::{Configuration, Info};
use tracing::instrument;

use super::logging;
use crate::container::AppContainer;

/// It loads the configuration and builds the application container.
///
/// # Panics
///
/// Will panic if the configuration cannot be loaded or the configured storage
/// backend cannot be opened.
#[must_use]
#[instrument(skip(info))]
pub fn setup(info: &Info) -> (Configuration, AppContainer) {
    let configuration = initialize_configuration(info);

    initialize_global_services(&configuration);

    tracing::info!("Configuration:\n{}", configuration.to_toml());

    let app_container = AppContainer::initialize(&configuration);

    (configuration, app_container)
}

/// It initializes the global services.
#[instrument(skip(configuration))]
pub fn initialize_global_services(configuration: &Configuration) {
    initialize_static();
    logging::setup(configuration);
}

/// It initializes the application static values.
///
/// These values are accessible throughout the entire application:
///
/// - The time when the application started.
#[instrument(skip())]
pub fn initialize_static() {
    swarm_tracker_clock::initialize_static();

    tracing::debug!("Application started at {:?}", *static_time::TIME_AT_APP_START);
}

/// It loads the application configuration.
///
/// # Panics
///
/// Will panic if it can't load the configuration from either
/// `./share/default/config/tracker.development.toml` file or the env var
/// `SWARM_TRACKER_CONFIG_TOML`.
#[must_use]
#[instrument(skip(info))]
pub fn initialize_configuration(info: &Info) -> Configuration {
    Configuration::load(info).expect("Error loading configuration from sources")
}

#[cfg(test)]
mod tests {
    use swarm_tracker_configuration::{Driver, Info};

    use super::initialize_configuration;

    #[test]
    fn it_should_load_the_configuration_from_toml_content() {
        let info = Info::from_toml(
            r#"
            [logging]
            threshold = "off"

            [core.storage]
            driver = "sqlite3"
            "#,
        );

        let configuration = initialize_configuration(&info);

        assert_eq!(configuration.core.storage.driver, Driver::Sqlite3);
    }
}
