use derive_more::Constructor;
use serde::Serialize;

/// Swarm statistics for one torrent.
///
/// Swarm metadata dictionary in the scrape response.
///
/// See [BEP 48: Tracker Protocol Extension: Scrape](https://www.bittorrent.org/beps/bep_0048.html)
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Constructor, Serialize)]
pub struct SwarmMetadata {
    /// (i.e `completed`): The number of `event=completed` announces ever
    /// received for the swarm.
    pub downloaded: u64,

    /// (i.e `seeders`): The number of peers currently reporting `left == 0`.
    pub complete: u64,

    /// (i.e `leechers`): The number of peers currently reporting `left != 0`.
    pub incomplete: u64,
}

impl SwarmMetadata {
    #[must_use]
    pub fn zeroed() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn downloads(&self) -> u64 {
        self.downloaded
    }

    #[must_use]
    pub fn seeders(&self) -> u64 {
        self.complete
    }

    #[must_use]
    pub fn leechers(&self) -> u64 {
        self.incomplete
    }
}
