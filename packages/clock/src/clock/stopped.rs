use std::num::IntErrorKind;
use std::time::Duration;

use swarm_tracker_primitives::DurationSinceUnixEpoch;

use super::Time;
use crate::clock;

#[allow(clippy::module_name_repetitions)]
#[derive(Debug)]
pub struct StoppedClock;

/// Trait for types that can be used as a timestamp clock stopped
/// at a given time.
#[allow(clippy::module_name_repetitions)]
pub trait Stopped: clock::Time {
    /// It sets the clock to a given time.
    fn local_set(unix_time: &DurationSinceUnixEpoch);

    /// It sets the clock to the Unix Epoch.
    fn local_set_to_unix_epoch() {
        Self::local_set(&DurationSinceUnixEpoch::ZERO);
    }

    /// It sets the clock to the time the application started.
    fn local_set_to_app_start_time();

    /// It sets the clock to the current system time.
    fn local_set_to_system_time_now();

    /// It adds a `Duration` to the clock.
    ///
    /// # Errors
    ///
    /// Will return `IntErrorKind` if `duration` would overflow the internal `Duration`.
    fn local_add(duration: &Duration) -> Result<(), IntErrorKind>;

    /// It subtracts a `Duration` from the clock.
    ///
    /// # Errors
    ///
    /// Will return `IntErrorKind` if `duration` would underflow the internal `Duration`.
    fn local_sub(duration: &Duration) -> Result<(), IntErrorKind>;

    /// It resets the clock to default fixed time that is application start time (or the unix epoch when testing).
    fn local_reset();
}

impl Time for clock::Stopped {
    fn now() -> DurationSinceUnixEpoch {
        detail::FIXED_TIME.with(|time| *time.borrow())
    }

    fn dbg_clock_type() -> String {
        "Stopped".to_owned()
    }
}

impl Stopped for clock::Stopped {
    fn local_set(unix_time: &DurationSinceUnixEpoch) {
        detail::FIXED_TIME.with(|time| {
            *time.borrow_mut() = *unix_time;
        });
    }

    fn local_set_to_app_start_time() {
        Self::local_set(&detail::get_app_start_time());
    }

    fn local_set_to_system_time_now() {
        Self::local_set(&clock::Working::now());
    }

    fn local_add(duration: &Duration) -> Result<(), IntErrorKind> {
        detail::FIXED_TIME.with(|time| {
            let current = *time.borrow();
            let Some(updated) = current.checked_add(*duration) else {
                return Err(IntErrorKind::PosOverflow);
            };
            *time.borrow_mut() = updated;
            Ok(())
        })
    }

    fn local_sub(duration: &Duration) -> Result<(), IntErrorKind> {
        detail::FIXED_TIME.with(|time| {
            let current = *time.borrow();
            let Some(updated) = current.checked_sub(*duration) else {
                return Err(IntErrorKind::NegOverflow);
            };
            *time.borrow_mut() = updated;
            Ok(())
        })
    }

    fn local_reset() {
        Self::local_set(&detail::get_default_fixed_time());
    }
}


mod detail {
    use std::cell::RefCell;
    use std::time::SystemTime;

    use swarm_tracker_primitives::DurationSinceUnixEpoch;

    use crate::static_time;

    thread_local!(pub static FIXED_TIME: RefCell<DurationSinceUnixEpoch> = RefCell::new(get_default_fixed_time()));

    pub fn get_app_start_time() -> DurationSinceUnixEpoch {
        (*static_time::TIME_AT_APP_START)
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
    }

    #[cfg(not(test))]
    pub fn get_default_fixed_time() -> DurationSinceUnixEpoch {
        get_app_start_time()
    }

    #[cfg(test)]
    pub fn get_default_fixed_time() -> DurationSinceUnixEpoch {
        DurationSinceUnixEpoch::ZERO
    }
}
