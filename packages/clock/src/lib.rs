//! Time related functions and types.
//!
//! The tracker never reads the system time directly. Every timestamp goes
//! through a [`clock::Time`] implementation so tests can freeze and move the
//! time deterministically:
//!
//! - [`clock::Working`]: the real system clock, used in production.
//! - [`clock::Stopped`]: a per-thread settable clock, used in tests.
//!
//! Clocks use the type `DurationSinceUnixEpoch` which is a
//! `std::time::Duration` since the Unix Epoch (timestamp).
//!
//! > **NOTICE**: the timestamp does not depend on the time zone.
pub mod clock;
pub mod conv;
pub mod static_time;

#[macro_use]
extern crate lazy_static;

use tracing::instrument;

/// This code needs to be copied into each crate.
/// Working version, for production.
#[cfg(not(test))]
#[allow(dead_code)]
pub(crate) type CurrentClock = clock::Working;

/// Stopped version, for testing.
#[cfg(test)]
#[allow(dead_code)]
pub(crate) type CurrentClock = clock::Stopped;

/// It initializes the application static values.
///
/// At the moment only the time when the application started.
#[instrument(skip())]
pub fn initialize_static() {
    lazy_static::initialize(&static_time::TIME_AT_APP_START);
}
