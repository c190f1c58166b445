//! Clock types.
//!
//! ```rust
//! use std::time::Duration;
//!
//! use swarm_tracker_clock::clock::stopped::Stopped as _;
//! use swarm_tracker_clock::clock::{self, Time as _};
//!
//! clock::Stopped::local_set(&Duration::from_secs(1_700_000_000));
//!
//! assert_eq!(clock::Stopped::now(), Duration::from_secs(1_700_000_000));
//! ```
use std::marker::PhantomData;
use std::time::Duration;

use swarm_tracker_primitives::DurationSinceUnixEpoch;

use self::stopped::StoppedClock;
use self::working::WorkingClock;

pub mod stopped;
pub mod working;

/// A generic structure that represents a clock.
///
/// It can be either the working clock (production) or the stopped clock
/// (testing). It implements the `Time` trait, which gives you the current time.
#[derive(Debug)]
pub struct Clock<T> {
    clock: PhantomData<T>,
}

/// The working clock. It returns the current time.
pub type Working = Clock<WorkingClock>;

/// The stopped clock. It returns always the same fixed time.
pub type Stopped = Clock<StoppedClock>;

/// Trait for types that can be used as a timestamp clock.
pub trait Time: Sized {
    fn now() -> DurationSinceUnixEpoch;

    fn dbg_clock_type() -> String;

    #[must_use]
    fn now_add(add_time: &Duration) -> Option<DurationSinceUnixEpoch> {
        Self::now().checked_add(*add_time)
    }

    #[must_use]
    fn now_sub(sub_time: &Duration) -> Option<DurationSinceUnixEpoch> {
        Self::now().checked_sub(*sub_time)
    }
}
