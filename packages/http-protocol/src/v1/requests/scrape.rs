//! `Scrape` request for the HTTP tracker.
//!
//! The `info_hash` param is repeated once per swarm:
//! `/scrape?info_hash=<hash 1>&info_hash=<hash 2>`. A scrape without any
//! `info_hash` is valid; what it returns is up to the tracker policy.
use std::str::FromStr;

use bittorrent_primitives::info_hash::InfoHash;
use thiserror::Error;

use crate::percent_encoding::{percent_decode_info_hash, InfoHashDecodeError};
use crate::v1::query::{ParseQueryError, Query};

// Query param names
const INFO_HASH: &str = "info_hash";

#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct Scrape {
    pub info_hashes: Vec<InfoHash>,
}

/// Errors that can occur when parsing the `Scrape` request.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum ParseScrapeQueryError {
    #[error("{source}")]
    InvalidInfoHash { source: InfoHashDecodeError },

    #[error("Invalid query string: {source}")]
    InvalidQuery { source: ParseQueryError },
}

impl From<InfoHashDecodeError> for ParseScrapeQueryError {
    fn from(source: InfoHashDecodeError) -> Self {
        Self::InvalidInfoHash { source }
    }
}

impl From<ParseQueryError> for ParseScrapeQueryError {
    fn from(source: ParseQueryError) -> Self {
        Self::InvalidQuery { source }
    }
}

impl TryFrom<Query> for Scrape {
    type Error = ParseScrapeQueryError;

    fn try_from(query: Query) -> Result<Self, Self::Error> {
        let info_hashes = query
            .get_param_vec(INFO_HASH)
            .unwrap_or_default()
            .iter()
            .map(|raw_param| percent_decode_info_hash(raw_param))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { info_hashes })
    }
}

impl FromStr for Scrape {
    type Err = ParseScrapeQueryError;

    fn from_str(raw_query: &str) -> Result<Self, Self::Err> {
        Self::try_from(raw_query.parse::<Query>()?)
    }
}
