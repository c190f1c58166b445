//! `Error` response for the HTTP tracker.
//!
//! Data structures and logic to build the error responses.
//!
//! From the [BEP 03. The `BitTorrent` Protocol Specification](https://www.bittorrent.org/beps/bep_0003.html):
//!
//! _"Tracker responses are bencoded dictionaries. If a tracker response has a
//! key failure reason, then that maps to a human readable string which explains
//! why the query failed, and no other keys are required."_
//!
//! The response also carries `interval`, so clients that read it back off
//! before retrying.
use swarm_tracker_contrib_bencode::{ben_bytes, ben_int, ben_map};

use crate::v1::requests::announce::ParseAnnounceQueryError;
use crate::v1::requests::scrape::ParseScrapeQueryError;

/// `Error` response for the HTTP tracker.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Error {
    /// Human readable string which explains why the request failed.
    pub failure_reason: String,
    /// Seconds the client should wait before announcing again.
    pub interval: u32,
}

impl Error {
    #[must_use]
    pub fn new(failure_reason: impl Into<String>, interval: u32) -> Self {
        Self {
            failure_reason: failure_reason.into(),
            interval,
        }
    }

    /// Returns the bencoded representation of the `Error` response.
    ///
    /// ```rust
    /// use bittorrent_http_tracker_protocol::v1::responses::error::Error;
    ///
    /// let err = Error::new("Missing Argument (uploaded)", 1800);
    ///
    /// assert_eq!(
    ///     err.body(),
    ///     b"d14:failure reason27:Missing Argument (uploaded)8:intervali1800ee".to_vec()
    /// );
    /// ```
    #[must_use]
    pub fn body(&self) -> Vec<u8> {
        ben_map! {
            "failure reason" => ben_bytes!(self.failure_reason.as_str()),
            "interval" => ben_int!(self.interval)
        }
        .encode()
    }

    #[must_use]
    pub fn from_announce_query_error(err: &ParseAnnounceQueryError, interval: u32) -> Self {
        Self::new(err.to_string(), interval)
    }

    #[must_use]
    pub fn from_scrape_query_error(err: &ParseScrapeQueryError, interval: u32) -> Self {
        Self::new(err.to_string(), interval)
    }
}
