//! Peer struct used by the registry.
//!
//! A sample peer:
//!
//! ```rust,no_run
//! use std::net::{IpAddr, Ipv4Addr};
//!
//! use swarm_tracker_primitives::peer::{PeerEntry, PeerId};
//! use swarm_tracker_primitives::DurationSinceUnixEpoch;
//!
//! let peer_id = PeerId::from(*b"-qB00000000000000000");
//!
//! let entry = PeerEntry {
//!     ip: IpAddr::V4(Ipv4Addr::new(126, 0, 0, 1)),
//!     port: 8080,
//!     uploaded: 0,
//!     downloaded: 0,
//!     left: 0,
//!     last_announce: DurationSinceUnixEpoch::new(1_669_397_478_934, 0),
//! };
//! ```
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use serde::{Deserialize, Serialize};

use crate::{DurationSinceUnixEpoch, NumberOfBytes};

/// Client-supplied peer identifier.
///
/// It's 20 bytes by convention but the tracker accepts any byte string, so it
/// is kept as an owned byte vector and never validated.
#[derive(PartialEq, Eq, Hash, Clone, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct PeerId(Vec<u8>);

impl PeerId {
    #[must_use]
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    #[must_use]
    pub fn to_hex_string(&self) -> String {
        use std::fmt::Write as _;

        self.0.iter().fold(String::with_capacity(self.0.len() * 2), |mut out, byte| {
            let _ = write!(out, "{byte:02x}");
            out
        })
    }
}

impl From<Vec<u8>> for PeerId {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for PeerId {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl<const N: usize> From<[u8; N]> for PeerId {
    fn from(bytes: [u8; N]) -> Self {
        Self(bytes.to_vec())
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex_string())
    }
}

impl fmt::Debug for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PeerId({})", String::from_utf8_lossy(&self.0))
    }
}

/// The state of one peer in one swarm, as last announced.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PeerEntry {
    /// The address the peer asked to be reached at, or the address it connected from.
    pub ip: IpAddr,
    pub port: u16,
    pub uploaded: NumberOfBytes,
    pub downloaded: NumberOfBytes,
    /// Bytes still missing. Zero means the peer is a seeder.
    pub left: NumberOfBytes,
    /// Set by the tracker on every accepted announce.
    pub last_announce: DurationSinceUnixEpoch,
}

impl PeerEntry {
    #[must_use]
    pub fn is_seeder(&self) -> bool {
        self.left == 0
    }

    #[must_use]
    pub fn is_leecher(&self) -> bool {
        !self.is_seeder()
    }

    #[must_use]
    pub fn peer_addr(&self) -> SocketAddr {
        SocketAddr::new(self.ip, self.port)
    }

    /// Whether the peer last announced before the `cutoff` instant.
    #[must_use]
    pub fn is_inactive_since(&self, cutoff: DurationSinceUnixEpoch) -> bool {
        self.last_announce < cutoff
    }
}

pub mod fixture {
    use std::net::{IpAddr, Ipv4Addr};

    use super::{PeerEntry, PeerId};
    use crate::{DurationSinceUnixEpoch, NumberOfBytes};

    /// Builder for peers used in tests across the workspace.
    #[derive(PartialEq, Debug)]
    pub struct PeerBuilder {
        peer_id: PeerId,
        entry: PeerEntry,
    }

    impl Default for PeerBuilder {
        fn default() -> Self {
            Self {
                peer_id: PeerId::from(*b"-qB00000000000000000"),
                entry: PeerEntry {
                    ip: IpAddr::V4(Ipv4Addr::new(126, 0, 0, 1)),
                    port: 8080,
                    uploaded: 0,
                    downloaded: 0,
                    left: 0,
                    last_announce: DurationSinceUnixEpoch::new(1_669_397_478_934, 0),
                },
            }
        }
    }

    impl PeerBuilder {
        #[must_use]
        pub fn seeder() -> Self {
            Self::default().with_peer_id(b"-qB00000000000000001").with_bytes_left(0)
        }

        #[must_use]
        pub fn leecher() -> Self {
            Self::default()
                .with_peer_id(b"-qB00000000000000002")
                .with_ip(IpAddr::V4(Ipv4Addr::new(126, 0, 0, 2)))
                .with_bytes_left(10)
        }

        #[must_use]
        pub fn with_peer_id(mut self, peer_id: &[u8]) -> Self {
            self.peer_id = PeerId::from(peer_id);
            self
        }

        #[must_use]
        pub fn with_ip(mut self, ip: IpAddr) -> Self {
            self.entry.ip = ip;
            self
        }

        #[must_use]
        pub fn with_port(mut self, port: u16) -> Self {
            self.entry.port = port;
            self
        }

        #[must_use]
        pub fn with_bytes_left(mut self, left: NumberOfBytes) -> Self {
            self.entry.left = left;
            self
        }

        #[must_use]
        pub fn with_bytes_uploaded(mut self, uploaded: NumberOfBytes) -> Self {
            self.entry.uploaded = uploaded;
            self
        }

        #[must_use]
        pub fn with_bytes_downloaded(mut self, downloaded: NumberOfBytes) -> Self {
            self.entry.downloaded = downloaded;
            self
        }

        #[must_use]
        pub fn last_announced_at(mut self, last_announce: DurationSinceUnixEpoch) -> Self {
            self.entry.last_announce = last_announce;
            self
        }

        #[must_use]
        pub fn build(self) -> (PeerId, PeerEntry) {
            (self.peer_id, self.entry)
        }

        #[must_use]
        pub fn into_entry(self) -> PeerEntry {
            self.entry
        }
    }
}

#[cfg(test)]
mod tests {

    mod peer_id {
        use crate::peer::PeerId;

        #[test]
        fn it_should_accept_byte_strings_of_any_length() {
            assert_eq!(PeerId::from(*b"short").as_bytes(), b"short");
            assert_eq!(PeerId::from(vec![0u8; 32]).as_bytes().len(), 32);
        }

        #[test]
        fn it_should_be_displayed_as_a_hex_string() {
            assert_eq!(PeerId::from([0x2d, 0xff]).to_string(), "2dff");
        }
    }

    mod peer_entry {
        use rstest::rstest;

        use crate::peer::fixture::PeerBuilder;
        use crate::DurationSinceUnixEpoch;

        #[rstest]
        #[case(0, true)]
        #[case(1, false)]
        #[case(u64::MAX, false)]
        fn it_should_be_a_seeder_only_when_no_bytes_are_left(#[case] left: u64, #[case] is_seeder: bool) {
            let entry = PeerBuilder::default().with_bytes_left(left).into_entry();

            assert_eq!(entry.is_seeder(), is_seeder);
            assert_eq!(entry.is_leecher(), !is_seeder);
        }

        #[test]
        fn it_should_be_inactive_when_the_last_announce_is_before_the_cutoff() {
            let entry = PeerBuilder::default()
                .last_announced_at(DurationSinceUnixEpoch::from_secs(100))
                .into_entry();

            assert!(entry.is_inactive_since(DurationSinceUnixEpoch::from_secs(101)));
            assert!(!entry.is_inactive_since(DurationSinceUnixEpoch::from_secs(100)));
        }
    }
}
