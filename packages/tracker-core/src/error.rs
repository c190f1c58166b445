//! Errors returned by the tracker core handlers.
//!
//! Their `Display` text is what the client receives as `failure reason`.
use swarm_tracker_registry::storage;

/// Errors related to announce requests.
#[derive(thiserror::Error, Debug, Clone)]
pub enum AnnounceError {
    #[error("The swarm registry failed to apply the announce: {source}")]
    Registry { source: storage::Error },
}

impl From<storage::Error> for AnnounceError {
    fn from(source: storage::Error) -> Self {
        Self::Registry { source }
    }
}

/// Errors related to scrape requests.
#[derive(thiserror::Error, Debug, Clone)]
pub enum ScrapeError {
    #[error("The swarm registry failed to read the swarm statistics: {source}")]
    Registry { source: storage::Error },
}

impl From<storage::Error> for ScrapeError {
    fn from(source: storage::Error) -> Self {
        Self::Registry { source }
    }
}
