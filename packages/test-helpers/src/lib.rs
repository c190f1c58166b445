//! Testing helpers for the swarm tracker.
//!
//! - `configuration`: ephemeral configurations for tests.
//! - `logging`: a tracing subscriber that captures log lines for assertions.
pub mod configuration;
pub mod logging;
pub mod random;
