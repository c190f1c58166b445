use serde::{Deserialize, Serialize};

/// The storage backend holding the swarms.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Storage {
    /// Backend driver.
    #[serde(default = "Storage::default_driver")]
    pub driver: Driver,

    /// Database file for the `sqlite3` driver. Ignored by `in_memory`.
    #[serde(default = "Storage::default_path")]
    pub path: String,

    /// Time budget in milliseconds for one storage operation. Requests whose
    /// storage calls exceed it fail with a bencoded failure response.
    #[serde(default = "Storage::default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for Storage {
    fn default() -> Self {
        Self {
            driver: Self::default_driver(),
            path: Self::default_path(),
            request_timeout_ms: Self::default_request_timeout_ms(),
        }
    }
}

impl Storage {
    fn default_driver() -> Driver {
        Driver::InMemory
    }

    fn default_path() -> String {
        String::from("./storage/swarm-tracker/lib/database/sqlite3.db")
    }

    fn default_request_timeout_ms() -> u64 {
        5000
    }
}

/// The storage engine used for the swarm registry.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, derive_more::Display, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum Driver {
    /// Lock-free in-process maps. Swarms are lost on restart.
    InMemory,
    /// The Sqlite3 database driver.
    Sqlite3,
}
