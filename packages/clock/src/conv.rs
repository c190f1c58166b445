//! Conversions between tracker timestamps and other time representations.
use chrono::{DateTime, Utc};
use swarm_tracker_primitives::DurationSinceUnixEpoch;

/// It converts a timestamp to a `DateTime::<Utc>`.
///
/// Instants that do not fit in a `DateTime::<Utc>` (hundreds of billions of
/// years away) are clamped to `DateTime::<Utc>::MAX_UTC`.
#[must_use]
pub fn convert_from_timestamp_to_datetime_utc(duration: DurationSinceUnixEpoch) -> DateTime<Utc> {
    i64::try_from(duration.as_secs())
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, duration.subsec_nanos()))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Milliseconds since the Unix Epoch, as stored by the SQL backends.
///
/// Sub-millisecond precision is dropped. Saturates instead of failing for
/// instants beyond `i64::MAX` milliseconds.
#[must_use]
pub fn timestamp_to_unix_millis(duration: DurationSinceUnixEpoch) -> i64 {
    i64::try_from(duration.as_millis()).unwrap_or(i64::MAX)
}

/// Inverse of [`timestamp_to_unix_millis`]. Negative values clamp to the epoch.
#[must_use]
pub fn unix_millis_to_timestamp(millis: i64) -> DurationSinceUnixEpoch {
    DurationSinceUnixEpoch::from_millis(u64::try_from(millis).unwrap_or_default())
}
