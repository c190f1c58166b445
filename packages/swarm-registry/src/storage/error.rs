//! Storage errors.
//!
//! Driver errors (`rusqlite`, `r2d2`) are converted into [`Error`] at the
//! backend boundary. The registry uses [`Error::is_transient`] to decide
//! whether an idempotent operation is worth a second attempt.
use std::panic::Location;
use std::sync::Arc;
use std::time::Duration;

use r2d2_sqlite::rusqlite::ErrorCode;
use swarm_tracker_configuration::Driver;
use swarm_tracker_located_error::{DynError, LocatedError};

#[derive(thiserror::Error, Debug, Clone)]
pub enum Error {
    /// The backend could not be reached (e.g. no connection in the pool).
    #[error("The {driver} storage is unavailable: {source}")]
    Unavailable {
        source: LocatedError<'static, dyn std::error::Error + Send + Sync>,
        driver: Driver,
    },

    /// A concurrent writer holds the record and the backend gave up waiting.
    #[error("Conflicting concurrent write on the {driver} storage: {source}")]
    Conflict {
        source: LocatedError<'static, dyn std::error::Error + Send + Sync>,
        driver: Driver,
    },

    /// The backend rejected or failed the statement.
    #[error("The {driver} query failed: {source}")]
    Query {
        source: LocatedError<'static, dyn std::error::Error + Send + Sync>,
        driver: Driver,
    },

    /// A stored record could not be turned back into a swarm or a peer.
    #[error("Corrupted {driver} record ({reason}), {location}")]
    CorruptedRecord {
        reason: String,
        location: &'static Location<'static>,
        driver: Driver,
    },

    /// The operation did not finish within the request budget.
    #[error("Storage operation `{operation}` did not complete within {timeout:?}, {location}")]
    Timeout {
        operation: &'static str,
        timeout: Duration,
        location: &'static Location<'static>,
    },

    /// The blocking task running the operation panicked or was cancelled.
    #[error("Storage operation `{operation}` was aborted: {reason}, {location}")]
    TaskFailed {
        operation: &'static str,
        reason: String,
        location: &'static Location<'static>,
    },
}

impl Error {
    /// Whether the same call may succeed if attempted again.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::Unavailable { .. } | Error::Conflict { .. } | Error::Timeout { .. })
    }
}

impl From<r2d2_sqlite::rusqlite::Error> for Error {
    #[track_caller]
    fn from(err: r2d2_sqlite::rusqlite::Error) -> Self {
        let is_busy = matches!(
            err.sqlite_error_code(),
            Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked)
        );

        let source = (Arc::new(err) as DynError).into();

        if is_busy {
            Error::Conflict {
                source,
                driver: Driver::Sqlite3,
            }
        } else {
            Error::Query {
                source,
                driver: Driver::Sqlite3,
            }
        }
    }
}

impl From<(r2d2::Error, Driver)> for Error {
    #[track_caller]
    fn from(e: (r2d2::Error, Driver)) -> Self {
        let (err, driver) = e;
        Self::Unavailable {
            source: (Arc::new(err) as DynError).into(),
            driver,
        }
    }
}
