//! Primitive types and functions for the `BitTorrent` HTTP tracker protocol.
//!
//! - [`v1::query`]: a raw URL query parser. Values stay percent-encoded
//!   because `info_hash` and `peer_id` are arbitrary bytes.
//! - [`v1::requests`]: validated `announce` and `scrape` requests.
//! - [`v1::responses`]: bencoded `announce`, `scrape` and failure responses.
//! - [`v1::services::peer_ip_resolver`]: which IP a peer is reachable at.
//!
//! Specification: <https://www.bittorrent.org/beps/bep_0003.html>.
pub mod percent_encoding;
pub mod v1;
