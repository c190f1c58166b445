//! Percent decoding of the binary announce and scrape params.
//!
//! `info_hash` and `peer_id` are sent as URL-encoded raw bytes, e.g.
//! `%3B%24U%04%CF%5F%11%BB%DB%E1%20%1C%EAjk%F4Z%EE%1B%C0`. They are not
//! necessarily valid UTF-8, so they are decoded to bytes, never to `String`.
use bittorrent_primitives::info_hash::InfoHash;
use ::percent_encoding::percent_decode_str;
use swarm_tracker_primitives::peer::PeerId;
use thiserror::Error;

/// Length of a binary info-hash.
pub const INFO_HASH_BYTES_LEN: usize = 20;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InfoHashDecodeError {
    #[error("Invalid info_hash size (expected {INFO_HASH_BYTES_LEN} bytes, got {size})")]
    InvalidSize { size: usize },
}

/// Decodes a percent-encoded info-hash.
///
/// # Errors
///
/// Will return an error if the decoded value is not exactly 20 bytes long.
pub fn percent_decode_info_hash(raw_info_hash: &str) -> Result<InfoHash, InfoHashDecodeError> {
    let bytes: Vec<u8> = percent_decode_str(raw_info_hash).collect();

    let array: [u8; INFO_HASH_BYTES_LEN] = bytes
        .as_slice()
        .try_into()
        .map_err(|_| InfoHashDecodeError::InvalidSize { size: bytes.len() })?;

    Ok(InfoHash::from(array))
}

/// Decodes a percent-encoded peer ID. Any byte string is a valid peer ID.
#[must_use]
pub fn percent_decode_peer_id(raw_peer_id: &str) -> PeerId {
    PeerId::new(percent_decode_str(raw_peer_id).collect())
}

/// Decodes a percent-encoded text param. Invalid UTF-8 is replaced.
#[must_use]
pub fn percent_decode_text(raw_value: &str) -> String {
    percent_decode_str(raw_value).decode_utf8_lossy().into_owned()
}
