//! This module provides functionality for setting up the swarm storage.
use std::sync::Arc;

use swarm_tracker_configuration::{Driver, Storage};

use super::in_memory::InMemorySwarmStorage;
use super::sqlite::SqliteSwarmStorage;
use super::{Error, SwarmStorage};

/// It builds a new swarm storage backend.
///
/// > **WARNING**: building the `sqlite3` backend creates the tables if they do
/// > not exist yet.
///
/// # Errors
///
/// Will return `Error` if the backend cannot be opened.
pub fn build(driver: &Driver, db_path: &str) -> Result<Box<dyn SwarmStorage>, Error> {
    let storage: Box<dyn SwarmStorage> = match driver {
        Driver::InMemory => Box::new(InMemorySwarmStorage::new()),
        Driver::Sqlite3 => Box::new(SqliteSwarmStorage::new(db_path)?),
    };

    Ok(storage)
}

/// Initializes the swarm storage selected in the configuration.
///
/// The result is shared by every component through an `Arc`.
///
/// # Panics
///
/// This function will panic if the storage cannot be initialized, for example
/// when the `SQLite` file cannot be created.
#[must_use]
pub fn initialize_storage(config: &Storage) -> Arc<Box<dyn SwarmStorage>> {
    Arc::new(build(&config.driver, &config.path).expect("Swarm storage build failed."))
}
