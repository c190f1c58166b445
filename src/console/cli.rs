//! Arguments of the `swarm-tracker` binary.
//!
//! ```text
//! swarm-tracker [--config <PATH>] [serve|reap]
//! ```
//!
//! Without a subcommand the tracker serves. The config path can also be given
//! with the `SWARM_TRACKER_CONFIG_TOML_PATH` env var.
use clap::{Parser, Subcommand};
use swarm_tracker_configuration::{Info, ENV_VAR_CONFIG_TOML_PATH};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long, env = ENV_VAR_CONFIG_TOML_PATH)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Command {
    /// Run the HTTP trackers and the periodic reaper until `Ctrl+C`.
    #[default]
    Serve,

    /// Remove the inactive peers once and exit.
    Reap,
}

impl Args {
    #[must_use]
    pub fn command(&self) -> Command {
        self.command.unwrap_or_default()
    }

    /// Where the configuration is loaded from.
    #[must_use]
    pub fn config_info(&self) -> Info {
        Info::new(self.config.clone())
    }
}
