//! Tracker configuration factories for testing.
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use swarm_tracker_configuration::{Configuration, Driver, HttpTracker, Threshold};

use crate::random;

/// This configuration is used for testing. It generates random config values
/// so they do not collide if you run more than one tracker at the same time.
///
/// - The HTTP tracker binds to a free port on the loopback interface.
/// - Swarms are kept in memory.
/// - Logging is limited to errors.
/// - The inactive peer reaper job is disabled. Tests run it explicitly.
///
/// # Panics
///
/// Will panic if it can't convert the temp file path to string.
#[must_use]
pub fn ephemeral() -> Configuration {
    let mut config = Configuration::default();

    config.logging.threshold = Threshold::Error;

    config.core.inactive_peer_cleanup_interval = 0;

    config.http_trackers = Some(vec![HttpTracker {
        bind_address: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 0),
    }]);

    config.core.storage.driver = Driver::InMemory;
    config.core.storage.path = ephemeral_sqlite_database()
        .to_str()
        .expect("temp database path should be valid UTF-8")
        .to_owned();

    config
}

/// Ephemeral configuration with the `SQLite` backend on a fresh database file.
#[must_use]
pub fn ephemeral_with_sqlite() -> Configuration {
    let mut config = ephemeral();

    config.core.storage.driver = Driver::Sqlite3;

    config
}

/// Ephemeral configuration with reverse proxy enabled.
#[must_use]
pub fn ephemeral_with_reverse_proxy() -> Configuration {
    let mut config = ephemeral();

    config.core.net.on_reverse_proxy = true;

    config
}

/// Ephemeral configuration with reverse proxy disabled.
#[must_use]
pub fn ephemeral_without_reverse_proxy() -> Configuration {
    let mut config = ephemeral();

    config.core.net.on_reverse_proxy = false;

    config
}

/// Ephemeral configuration where a scrape without info-hashes reports every
/// swarm.
#[must_use]
pub fn ephemeral_with_full_scrape() -> Configuration {
    let mut config = ephemeral();

    config.core.scrape_policy.all_swarms_without_info_hash = true;

    config
}

/// Ephemeral configuration without any HTTP tracker.
#[must_use]
pub fn ephemeral_with_no_services() -> Configuration {
    let mut config = ephemeral();

    config.http_trackers = None;

    config
}

/// A path for a new `SQLite` database file under the OS temp dir.
#[must_use]
pub fn ephemeral_sqlite_database() -> PathBuf {
    env::temp_dir().join(format!("swarm_tracker_{}.db", random::string(16)))
}
