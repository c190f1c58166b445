//! `Announce` request for the HTTP tracker.
//!
//! Data structures and logic for parsing the `announce` request.
use std::net::IpAddr;
use std::str::FromStr;

use bittorrent_primitives::info_hash::InfoHash;
use bittorrent_tracker_core::announce_handler::{Announcement, PeersWanted};
use swarm_tracker_primitives::announce_event::AnnounceEvent;
use swarm_tracker_primitives::peer::PeerId;
use swarm_tracker_primitives::NumberOfBytes;
use thiserror::Error;

use crate::percent_encoding::{percent_decode_info_hash, percent_decode_peer_id, percent_decode_text, InfoHashDecodeError};
use crate::v1::query::{ParseQueryError, Query};

// Query param names
const INFO_HASH: &str = "info_hash";
const PEER_ID: &str = "peer_id";
const PORT: &str = "port";
const UPLOADED: &str = "uploaded";
const DOWNLOADED: &str = "downloaded";
const LEFT: &str = "left";
const IP: &str = "ip";
const EVENT: &str = "event";
const COMPACT: &str = "compact";
const NO_PEER_ID: &str = "no_peer_id";
const NUMWANT: &str = "numwant";

/// Params every announce must carry, in the order they are checked.
const REQUIRED_PARAMS: [&str; 6] = [INFO_HASH, PEER_ID, PORT, UPLOADED, DOWNLOADED, LEFT];

/// The `Announce` request. Fields use the domain types after parsing the
/// query params of the request.
///
/// ```rust
/// use bittorrent_http_tracker_protocol::v1::query::Query;
/// use bittorrent_http_tracker_protocol::v1::requests::announce::Announce;
///
/// let raw_query = "info_hash=%3B%24U%04%CF%5F%11%BB%DB%E1%20%1C%EAjk%F4Z%EE%1B%C0\
///     &peer_id=-qB00000000000000001&port=17548&uploaded=0&downloaded=0&left=0";
///
/// let announce = Announce::try_from(raw_query.parse::<Query>().unwrap()).unwrap();
///
/// assert_eq!(announce.port, 17548);
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Announce {
    // Mandatory params
    /// The `InfoHash` of the torrent.
    pub info_hash: InfoHash,

    /// The `PeerId` chosen by the client.
    pub peer_id: PeerId,

    /// The port the peer listens on.
    pub port: u16,

    pub uploaded: NumberOfBytes,

    pub downloaded: NumberOfBytes,

    /// Zero means the peer is a seeder.
    pub left: NumberOfBytes,

    // Optional params
    /// The IP the peer wants to be reached at, instead of the one it
    /// connected from.
    pub ip: Option<IpAddr>,

    /// The event that triggered the announce. No event means a regular
    /// keep-alive announce.
    pub event: Option<AnnounceEvent>,

    /// Whether the response should use the compact peer list format.
    pub compact: Option<Compact>,

    /// Whether the peer IDs can be left out of the (non-compact) peer list.
    pub no_peer_id: bool,

    /// How many peers the client wants in the response.
    pub numwant: Option<u32>,
}

impl Announce {
    /// The announce as seen by the tracker core, from the resolved peer IP.
    #[must_use]
    pub fn to_announcement(&self, peer_ip: IpAddr) -> Announcement {
        Announcement {
            peer_id: self.peer_id.clone(),
            ip: peer_ip,
            port: self.port,
            uploaded: self.uploaded,
            downloaded: self.downloaded,
            left: self.left,
            event: self.event.unwrap_or_default(),
        }
    }

    #[must_use]
    pub fn peers_wanted(&self) -> PeersWanted {
        PeersWanted::from(self.numwant)
    }

    #[must_use]
    pub fn wants_compact_response(&self) -> bool {
        self.compact == Some(Compact::Accepted)
    }
}

/// Whether the client accepts the compact peer list format
/// (<https://www.bittorrent.org/beps/bep_0023.html>).
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Compact {
    /// The client accepts the compact format.
    Accepted = 1,
    /// The client wants the list of dictionaries format.
    NotAccepted = 0,
}

impl FromStr for Compact {
    type Err = String;

    fn from_str(raw_param: &str) -> Result<Self, Self::Err> {
        match raw_param {
            "1" => Ok(Self::Accepted),
            "0" => Ok(Self::NotAccepted),
            other => Err(other.to_owned()),
        }
    }
}

/// Errors that can occur when parsing the `Announce` request.
///
/// The `Display` text of each variant is sent to the client as the
/// `failure reason`.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum ParseAnnounceQueryError {
    #[error("Missing Argument ({param_name})")]
    MissingParam { param_name: String },

    #[error("{source}")]
    InvalidInfoHash { source: InfoHashDecodeError },

    #[error("Invalid Argument ({param_name}): not a non-negative integer ({param_value})")]
    InvalidNumber { param_name: String, param_value: String },

    #[error("Invalid Argument (port): out of range ({param_value})")]
    InvalidPort { param_value: String },

    #[error("Invalid Argument (event): unknown event ({param_value})")]
    InvalidEvent { param_value: String },

    #[error("Invalid Argument (compact): expected 0 or 1 ({param_value})")]
    InvalidCompact { param_value: String },

    #[error("Invalid query string: {source}")]
    InvalidQuery { source: ParseQueryError },
}

impl From<ParseQueryError> for ParseAnnounceQueryError {
    fn from(source: ParseQueryError) -> Self {
        Self::InvalidQuery { source }
    }
}

impl From<InfoHashDecodeError> for ParseAnnounceQueryError {
    fn from(source: InfoHashDecodeError) -> Self {
        Self::InvalidInfoHash { source }
    }
}

impl TryFrom<Query> for Announce {
    type Error = ParseAnnounceQueryError;

    fn try_from(query: Query) -> Result<Self, Self::Error> {
        if let Some(missing) = REQUIRED_PARAMS.iter().find(|param_name| !query.has_param(param_name)) {
            return Err(ParseAnnounceQueryError::MissingParam {
                param_name: (*missing).to_owned(),
            });
        }

        Ok(Self {
            info_hash: extract_info_hash(&query)?,
            peer_id: extract_peer_id(&query)?,
            port: extract_port(&query)?,
            uploaded: extract_number_of_bytes(&query, UPLOADED)?,
            downloaded: extract_number_of_bytes(&query, DOWNLOADED)?,
            left: extract_number_of_bytes(&query, LEFT)?,
            ip: extract_ip(&query),
            event: extract_event(&query)?,
            compact: extract_compact(&query)?,
            no_peer_id: extract_no_peer_id(&query),
            numwant: extract_numwant(&query)?,
        })
    }
}

impl FromStr for Announce {
    type Err = ParseAnnounceQueryError;

    fn from_str(raw_query: &str) -> Result<Self, Self::Err> {
        Self::try_from(raw_query.parse::<Query>()?)
    }
}

fn required_param(query: &Query, param_name: &str) -> Result<String, ParseAnnounceQueryError> {
    query.get_param(param_name).ok_or(ParseAnnounceQueryError::MissingParam {
        param_name: param_name.to_owned(),
    })
}

fn extract_info_hash(query: &Query) -> Result<InfoHash, ParseAnnounceQueryError> {
    Ok(percent_decode_info_hash(&required_param(query, INFO_HASH)?)?)
}

fn extract_peer_id(query: &Query) -> Result<PeerId, ParseAnnounceQueryError> {
    Ok(percent_decode_peer_id(&required_param(query, PEER_ID)?))
}

fn extract_port(query: &Query) -> Result<u16, ParseAnnounceQueryError> {
    let raw_param = percent_decode_text(&required_param(query, PORT)?);

    match raw_param.parse::<u16>() {
        Ok(port) if port != 0 => Ok(port),
        _ => Err(ParseAnnounceQueryError::InvalidPort { param_value: raw_param }),
    }
}

fn extract_number_of_bytes(query: &Query, param_name: &str) -> Result<NumberOfBytes, ParseAnnounceQueryError> {
    parse_non_negative_integer(param_name, &required_param(query, param_name)?)
}

fn extract_numwant(query: &Query) -> Result<Option<u32>, ParseAnnounceQueryError> {
    query
        .get_param(NUMWANT)
        .map(|raw_param| parse_non_negative_integer(NUMWANT, &raw_param))
        .transpose()
}

fn parse_non_negative_integer<T: FromStr>(param_name: &str, raw_param: &str) -> Result<T, ParseAnnounceQueryError> {
    let param_value = percent_decode_text(raw_param);

    // `u64::from_str` accepts a leading `+`.
    if !param_value.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(ParseAnnounceQueryError::InvalidNumber {
            param_name: param_name.to_owned(),
            param_value,
        });
    }

    param_value.parse::<T>().map_err(|_| ParseAnnounceQueryError::InvalidNumber {
        param_name: param_name.to_owned(),
        param_value: param_value.clone(),
    })
}

/// A value that is not an IP address (a DNS name, for example) is ignored,
/// so the peer is stored with the address it connected from.
fn extract_ip(query: &Query) -> Option<IpAddr> {
    query
        .get_param(IP)
        .and_then(|raw_param| percent_decode_text(&raw_param).parse::<IpAddr>().ok())
}

fn extract_event(query: &Query) -> Result<Option<AnnounceEvent>, ParseAnnounceQueryError> {
    match query.get_param(EVENT) {
        Some(raw_param) => percent_decode_text(&raw_param)
            .parse::<AnnounceEvent>()
            .map(Some)
            .map_err(|param_value| ParseAnnounceQueryError::InvalidEvent { param_value }),
        None => Ok(None),
    }
}

fn extract_compact(query: &Query) -> Result<Option<Compact>, ParseAnnounceQueryError> {
    match query.get_param(COMPACT) {
        Some(raw_param) => percent_decode_text(&raw_param)
            .parse::<Compact>()
            .map(Some)
            .map_err(|param_value| ParseAnnounceQueryError::InvalidCompact { param_value }),
        None => Ok(None),
    }
}

/// `no_peer_id` is a flag: present with any value other than `0` means yes.
fn extract_no_peer_id(query: &Query) -> bool {
    query.get_param(NO_PEER_ID).is_some_and(|raw_param| raw_param != "0")
}
