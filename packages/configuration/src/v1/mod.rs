//! Version `1` of the configuration schema.
pub mod core;
pub mod http_tracker;
pub mod logging;
pub mod network;
pub mod storage;

use std::fs;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use self::core::Core;
use self::http_tracker::HttpTracker;
use self::logging::Logging;
use crate::{Error, Info, CONFIG_OVERRIDE_PREFIX, CONFIG_OVERRIDE_SEPARATOR};

/// Core configuration for the tracker.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Default, Clone)]
pub struct Configuration {
    /// Logging configuration
    #[serde(default = "Configuration::default_logging")]
    pub logging: Logging,

    /// Core configuration.
    #[serde(default = "Configuration::default_core")]
    pub core: Core,

    /// The list of HTTP trackers. The tracker can run multiple HTTP tracker
    /// instances sharing the same swarm registry.
    #[serde(default = "Configuration::default_http_trackers")]
    pub http_trackers: Option<Vec<HttpTracker>>,
}

impl Configuration {
    fn default_logging() -> Logging {
        Logging::default()
    }

    fn default_core() -> Core {
        Core::default()
    }

    #[allow(clippy::unnecessary_wraps)]
    fn default_http_trackers() -> Option<Vec<HttpTracker>> {
        Some(vec![HttpTracker::default()])
    }

    /// Loads the configuration from the `Info` struct. The whole
    /// configuration in toml format is included in the `info.config_toml`
    /// string.
    ///
    /// Configuration provided via env var has priority over config file path.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the environment variable does not exist or has a bad configuration.
    pub fn load(info: &Info) -> Result<Configuration, Error> {
        let figment = if let Some(config_toml) = &info.config_toml {
            // Config in env var has priority over config file path
            Figment::from(Serialized::defaults(Configuration::default()))
                .merge(Toml::string(config_toml))
                .merge(Env::prefixed(CONFIG_OVERRIDE_PREFIX).split(CONFIG_OVERRIDE_SEPARATOR))
        } else {
            Figment::from(Serialized::defaults(Configuration::default()))
                .merge(Toml::file(&info.config_toml_path))
                .merge(Env::prefixed(CONFIG_OVERRIDE_PREFIX).split(CONFIG_OVERRIDE_SEPARATOR))
        };

        let config: Configuration = figment.extract()?;

        Ok(config)
    }

    /// Saves the configuration to the configuration file.
    ///
    /// # Errors
    ///
    /// Will return `Err` if `filename` does not exist or the user does not have
    /// permission to read it. Will also return `Err` if the configuration is
    /// not valid or cannot be encoded to TOML.
    ///
    /// # Panics
    ///
    /// Will panic if the configuration cannot be written into the file.
    pub fn save_to_file(&self, path: &str) -> Result<(), Error> {
        fs::write(path, self.to_toml()).expect("Could not write to file!");
        Ok(())
    }

    /// Encodes the configuration to TOML.
    ///
    /// # Panics
    ///
    /// Will panic if it can't be converted to TOML.
    #[must_use]
    pub fn to_toml(&self) -> String {
        toml::to_string(self).expect("Could not encode TOML value")
    }
}
