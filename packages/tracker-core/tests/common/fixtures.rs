use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;
use std::sync::Arc;

use bittorrent_primitives::info_hash::InfoHash;
use bittorrent_tracker_core::announce_handler::Announcement;
use swarm_tracker_configuration::{Core, Driver};
use swarm_tracker_primitives::announce_event::AnnounceEvent;
use swarm_tracker_primitives::peer::PeerId;
use swarm_tracker_test_helpers::configuration::ephemeral_sqlite_database;

#[must_use]
pub fn ephemeral_configuration() -> Arc<Core> {
    Arc::new(Core::default())
}

/// # Panics
///
/// Will panic if the temporary file path is not a valid UTF-8 string.
#[must_use]
pub fn ephemeral_sqlite_configuration() -> Arc<Core> {
    let mut config = Core::default();

    config.storage.driver = Driver::Sqlite3;
    ephemeral_sqlite_database()
        .to_str()
        .unwrap()
        .clone_into(&mut config.storage.path);

    Arc::new(config)
}

/// # Panics
///
/// Will panic if the string representation of the info hash is not a valid infohash.
#[must_use]
pub fn sample_info_hash() -> InfoHash {
    "3b245504cf5f11bbdbe1201cea6a6bf45aee1bc0" // DevSkim: ignore DS173237
        .parse::<InfoHash>()
        .expect("String should be a valid info hash")
}

/// An announce from a peer whose state is not relevant for the tests.
#[must_use]
pub fn sample_announcement(peer_id: &[u8], left: u64, event: AnnounceEvent) -> Announcement {
    Announcement {
        peer_id: PeerId::from(peer_id),
        ip: remote_client_ip(),
        port: 8080,
        uploaded: 0,
        downloaded: 0,
        left,
        event,
    }
}

// The client peer IP.
#[must_use]
pub fn remote_client_ip() -> IpAddr {
    IpAddr::V4(Ipv4Addr::from_str("126.0.0.1").unwrap())
}
