use std::time::SystemTime;

use swarm_tracker_primitives::DurationSinceUnixEpoch;

use crate::clock;

#[allow(clippy::module_name_repetitions)]
#[derive(Debug)]
pub struct WorkingClock;

impl clock::Time for clock::Working {
    fn now() -> DurationSinceUnixEpoch {
        SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
    }

    fn dbg_clock_type() -> String {
        "Working".to_owned()
    }
}
