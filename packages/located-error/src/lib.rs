//! An error decorator that keeps the source error together with the place in
//! the code where it was converted.
//!
//! Backends turn driver errors (`rusqlite`, `r2d2`, ...) into domain errors at
//! the boundary. Wrapping the driver error in a [`LocatedError`] with
//! `#[track_caller]` conversions keeps the line that produced the failure in
//! the log output without capturing a full backtrace.
//!
//! ```rust
//! use swarm_tracker_located_error::{Located, LocatedError};
//!
//! #[derive(thiserror::Error, Debug)]
//! enum StorageFailure {
//!     #[error("the storage backend is gone")]
//!     Gone,
//! }
//!
//! let error: LocatedError<'_, StorageFailure> = Located(StorageFailure::Gone).into();
//!
//! assert!(error.to_string().starts_with("the storage backend is gone, "));
//! ```
use std::error::Error;
use std::panic::Location;
use std::sync::Arc;

use tracing::debug;

pub type DynError = Arc<dyn std::error::Error + Send + Sync>;

/// Wrapper used to pick the `#[track_caller]` conversion into [`LocatedError`].
pub struct Located<E>(pub E);

/// An error with the location where it was converted.
#[derive(Debug)]
pub struct LocatedError<'a, E>
where
    E: Error + ?Sized + Send + Sync,
{
    source: Arc<E>,
    location: Box<Location<'a>>,
}

impl<E> std::fmt::Display for LocatedError<'_, E>
where
    E: Error + ?Sized + Send + Sync,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.source, self.location)
    }
}

impl<E> Error for LocatedError<'_, E>
where
    E: Error + ?Sized + Send + Sync + 'static,
{
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

impl<E> Clone for LocatedError<'_, E>
where
    E: Error + ?Sized + Send + Sync,
{
    fn clone(&self) -> Self {
        LocatedError {
            source: self.source.clone(),
            location: self.location.clone(),
        }
    }
}

impl<E> LocatedError<'_, E>
where
    E: Error + ?Sized + Send + Sync,
{
    #[must_use]
    pub fn location(&self) -> &Location<'_> {
        &self.location
    }
}

#[allow(clippy::from_over_into)]
impl<'a, E> Into<LocatedError<'a, E>> for Located<E>
where
    E: Error + Send + Sync,
    Arc<E>: Clone,
{
    #[track_caller]
    fn into(self) -> LocatedError<'a, E> {
        let e = LocatedError {
            source: Arc::new(self.0),
            location: Box::new(*std::panic::Location::caller()),
        };
        debug!("{e}");
        e
    }
}

#[allow(clippy::from_over_into)]
impl<'a> Into<LocatedError<'a, dyn std::error::Error + Send + Sync>> for DynError {
    #[track_caller]
    fn into(self) -> LocatedError<'a, dyn std::error::Error + Send + Sync> {
        LocatedError {
            source: self,
            location: Box::new(*std::panic::Location::caller()),
        }
    }
}
