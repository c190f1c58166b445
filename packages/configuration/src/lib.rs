//! Configuration data structures for the swarm tracker.
//!
//! The configuration is loaded in layers, each one overriding the previous:
//!
//! 1. Default values (`Configuration::default()`).
//! 2. A TOML file, or TOML content passed directly in an env var.
//! 3. Environment variables prefixed with `SWARM_TRACKER_CONFIG_OVERRIDE_`,
//!    where `__` separates nested sections. For example:
//!
//! ```text
//! SWARM_TRACKER_CONFIG_OVERRIDE_CORE__ANNOUNCE_POLICY__INTERVAL=60
//! ```
//!
//! The default configuration as TOML:
//!
//! ```toml
//! [logging]
//! threshold = "info"
//!
//! [core]
//! inactive_peer_cleanup_interval = 1800
//!
//! [core.announce_policy]
//! interval = 1800
//! interval_min = 900
//!
//! [core.peer_selection]
//! max_peers = 50
//! exclude_requesting_peer = true
//!
//! [core.scrape_policy]
//! all_swarms_without_info_hash = false
//!
//! [core.storage]
//! driver = "in_memory"
//! path = "./storage/swarm-tracker/lib/database/sqlite3.db"
//! request_timeout_ms = 5000
//!
//! [core.net]
//! on_reverse_proxy = false
//!
//! [[http_trackers]]
//! bind_address = "0.0.0.0:7070"
//! ```
pub mod v1;

use std::env;
use std::sync::Arc;

use swarm_tracker_located_error::{DynError, LocatedError};
use thiserror::Error;

pub type Configuration = v1::Configuration;
pub type Core = v1::core::Core;
pub type AnnouncePolicy = v1::core::AnnouncePolicy;
pub type PeerSelection = v1::core::PeerSelection;
pub type ScrapePolicy = v1::core::ScrapePolicy;
pub type Network = v1::network::Network;
pub type Storage = v1::storage::Storage;
pub type Driver = v1::storage::Driver;
pub type HttpTracker = v1::http_tracker::HttpTracker;
pub type Logging = v1::logging::Logging;
pub type Threshold = v1::logging::Threshold;

/// Prefix for env vars that overwrite configuration options.
const CONFIG_OVERRIDE_PREFIX: &str = "SWARM_TRACKER_CONFIG_OVERRIDE_";

/// Path separator in env var names for nested values in configuration.
const CONFIG_OVERRIDE_SEPARATOR: &str = "__";

/// The whole `tracker.toml` file content. It has priority over the config file.
/// Even if the file is not on the default path.
pub const ENV_VAR_CONFIG_TOML: &str = "SWARM_TRACKER_CONFIG_TOML";

/// The `tracker.toml` file location.
pub const ENV_VAR_CONFIG_TOML_PATH: &str = "SWARM_TRACKER_CONFIG_TOML_PATH";

/// Default `tracker.toml` file location.
pub const DEFAULT_PATH_CONFIG: &str = "./share/default/config/tracker.development.toml";

/// Information required for loading config.
#[derive(Debug, Default, Clone)]
pub struct Info {
    config_toml: Option<String>,
    config_toml_path: String,
}

impl Info {
    /// Build configuration Info.
    ///
    /// The TOML content given in the `SWARM_TRACKER_CONFIG_TOML` env var wins
    /// over any path. Otherwise the path given on the command line, then the
    /// `SWARM_TRACKER_CONFIG_TOML_PATH` env var, then the default path.
    #[must_use]
    pub fn new(config_toml_path: Option<String>) -> Self {
        let env_var_config_toml = ENV_VAR_CONFIG_TOML.to_string();
        let env_var_config_toml_path = ENV_VAR_CONFIG_TOML_PATH.to_string();

        let config_toml = if let Ok(config_toml) = env::var(env_var_config_toml) {
            println!("Loading extra configuration from environment variable:\n {config_toml}");
            Some(config_toml)
        } else {
            None
        };

        let config_toml_path = config_toml_path.unwrap_or_else(|| {
            if let Ok(config_toml_path) = env::var(env_var_config_toml_path) {
                println!("Loading extra configuration from file: `{config_toml_path}` ...");
                config_toml_path
            } else {
                println!("Loading extra configuration from default configuration file: `{DEFAULT_PATH_CONFIG}` ...");
                DEFAULT_PATH_CONFIG.to_string()
            }
        });

        Self {
            config_toml,
            config_toml_path,
        }
    }

    #[must_use]
    pub fn from_toml(config_toml: &str) -> Self {
        Self {
            config_toml: Some(config_toml.to_owned()),
            config_toml_path: DEFAULT_PATH_CONFIG.to_owned(),
        }
    }
}

/// Errors that can occur when loading the configuration.
#[derive(Error, Debug, Clone)]
pub enum Error {
    /// The configuration sources could not be merged or deserialized.
    #[error("Failed processing the configuration: {source}")]
    ConfigError {
        source: LocatedError<'static, dyn std::error::Error + Send + Sync>,
    },
}

impl From<figment::Error> for Error {
    #[track_caller]
    fn from(err: figment::Error) -> Self {
        Self::ConfigError {
            source: (Arc::new(err) as DynError).into(),
        }
    }
}
