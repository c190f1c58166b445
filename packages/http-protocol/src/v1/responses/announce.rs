//! `Announce` response for the HTTP tracker.
//!
//! Two peer list formats are supported:
//!
//! - A list of dictionaries, one per peer, with `ip`, `port` and `peer_id`
//!   ([BEP 03](https://www.bittorrent.org/beps/bep_0003.html)). The `peer_id`
//!   key is left out when the client sent `no_peer_id`.
//! - Compact ([BEP 23](https://www.bittorrent.org/beps/bep_0023.html)): IPv4
//!   peers packed as 6 bytes (address + port) in `peers`, IPv6 peers packed as
//!   18 bytes in `peers6` ([BEP 07](https://www.bittorrent.org/beps/bep_0007.html)).
//!
//! A `stopped` announce is answered with an empty dictionary.
use std::net::IpAddr;

use swarm_tracker_contrib_bencode::{ben_bytes, ben_int, ben_map, Value};
use swarm_tracker_primitives::core::AnnounceData;
use swarm_tracker_primitives::peer::{PeerEntry, PeerId};

use super::ben_count;
use crate::v1::requests::announce::Announce as AnnounceRequest;

/// How the peer list is rendered.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PeerListFormat {
    Dictionaries { include_peer_id: bool },
    Compact,
}

impl From<&AnnounceRequest> for PeerListFormat {
    fn from(request: &AnnounceRequest) -> Self {
        if request.wants_compact_response() {
            Self::Compact
        } else {
            Self::Dictionaries {
                include_peer_id: !request.no_peer_id,
            }
        }
    }
}

/// The `Announce` response for the HTTP tracker.
#[derive(Debug, PartialEq, Clone)]
pub struct Announce {
    announce_data: AnnounceData,
    format: PeerListFormat,
}

impl Announce {
    #[must_use]
    pub fn new(announce_data: AnnounceData, format: PeerListFormat) -> Self {
        Self { announce_data, format }
    }

    /// The response to a `stopped` announce: `de`.
    #[must_use]
    pub fn stopped_body() -> Vec<u8> {
        ben_map! {}.encode()
    }

    /// Returns the bencoded representation of the `Announce` response.
    #[must_use]
    pub fn body(&self) -> Vec<u8> {
        let stats = &self.announce_data.stats;
        let policy = &self.announce_data.policy;

        let mut response = ben_map! {
            "complete" => ben_count(stats.complete),
            "incomplete" => ben_count(stats.incomplete),
            "interval" => ben_int!(policy.interval),
            "min interval" => ben_int!(policy.interval_min)
        };

        if let Value::Dict(fields) = &mut response {
            match self.format {
                PeerListFormat::Dictionaries { include_peer_id } => {
                    fields.insert(b"peers".to_vec(), self.peer_dictionaries(include_peer_id));
                }
                PeerListFormat::Compact => {
                    let (peers, peers6) = self.compact_peers();

                    fields.insert(b"peers".to_vec(), ben_bytes!(peers));

                    if !peers6.is_empty() {
                        fields.insert(b"peers6".to_vec(), ben_bytes!(peers6));
                    }
                }
            }
        }

        response.encode()
    }

    fn peer_dictionaries(&self, include_peer_id: bool) -> Value {
        Value::List(
            self.announce_data
                .peers
                .iter()
                .map(|(peer_id, entry)| peer_dictionary(peer_id, entry, include_peer_id))
                .collect(),
        )
    }

    /// Packed IPv4 peers and packed IPv6 peers.
    fn compact_peers(&self) -> (Vec<u8>, Vec<u8>) {
        let mut peers = Vec::new();
        let mut peers6 = Vec::new();

        for (_, entry) in &self.announce_data.peers {
            match entry.ip {
                IpAddr::V4(ip) => {
                    peers.extend_from_slice(&ip.octets());
                    peers.extend_from_slice(&entry.port.to_be_bytes());
                }
                IpAddr::V6(ip) => {
                    peers6.extend_from_slice(&ip.octets());
                    peers6.extend_from_slice(&entry.port.to_be_bytes());
                }
            }
        }

        (peers, peers6)
    }
}

fn peer_dictionary(peer_id: &PeerId, entry: &PeerEntry, include_peer_id: bool) -> Value {
    let mut peer = ben_map! {
        "ip" => ben_bytes!(entry.ip.to_string()),
        "port" => ben_int!(entry.port)
    };

    if include_peer_id {
        if let Value::Dict(fields) = &mut peer {
            fields.insert(b"peer_id".to_vec(), ben_bytes!(peer_id.as_bytes()));
        }
    }

    peer
}
