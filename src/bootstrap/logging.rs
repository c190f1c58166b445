//! Setup for the application logging.
//!
//! The logging threshold comes from the `[logging]` configuration section:
//!
//! - `off`
//! - `error`
//! - `warn`
//! - `info` (default)
//! - `debug`
//! - `trace`
//!
//! The subscriber is global and can only be installed once per process.
use std::sync::Once;

use swarm_tracker_configuration::{Configuration, Threshold};
use tracing::level_filters::LevelFilter;

static INIT: Once = Once::new();

/// Output format of the log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraceStyle {
    #[default]
    Default,
    Pretty(bool),
    Compact,
    Json,
}

/// It redirects the log info to the standard output with the log threshold
/// defined in the configuration.
pub fn setup(cfg: &Configuration) {
    setup_with_style(cfg, TraceStyle::Default);
}

pub fn setup_with_style(cfg: &Configuration, style: TraceStyle) {
    let tracing_level = map_to_tracing_level_filter(cfg.logging.threshold);

    if tracing_level == LevelFilter::OFF {
        return;
    }

    INIT.call_once(|| {
        tracing_stdout_init(tracing_level, style);
    });
}

#[must_use]
pub fn map_to_tracing_level_filter(threshold: Threshold) -> LevelFilter {
    match threshold {
        Threshold::Off => LevelFilter::OFF,
        Threshold::Error => LevelFilter::ERROR,
        Threshold::Warn => LevelFilter::WARN,
        Threshold::Info => LevelFilter::INFO,
        Threshold::Debug => LevelFilter::DEBUG,
        Threshold::Trace => LevelFilter::TRACE,
    }
}

fn tracing_stdout_init(filter: LevelFilter, style: TraceStyle) {
    let builder = tracing_subscriber::fmt().with_max_level(filter).with_ansi(true);

    let () = match style {
        TraceStyle::Default => builder.init(),
        TraceStyle::Pretty(display_filename) => builder.pretty().with_file(display_filename).init(),
        TraceStyle::Compact => builder.compact().init(),
        TraceStyle::Json => builder.json().init(),
    };

    tracing::info!("Logging initialized");
}
