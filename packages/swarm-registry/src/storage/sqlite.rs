//! The `SQLite3` swarm storage.
//!
//! Tables:
//!
//! ```text
//! swarms (info_hash TEXT PRIMARY KEY, completed INTEGER)
//! peers  (info_hash TEXT, peer_id BLOB, ip TEXT, port INTEGER, uploaded INTEGER,
//!         downloaded INTEGER, bytes_left INTEGER, last_announce INTEGER,
//!         PRIMARY KEY (info_hash, peer_id))
//! ```
//!
//! Info-hashes are stored as 40-char lowercase hex strings. Byte counters are
//! stored as `INTEGER` (signed 64 bits) and saturate at `i64::MAX`.
//! `last_announce` is stored in milliseconds since the Unix Epoch.
//!
//! Each primitive is a single statement, so `SQLite` provides the atomicity:
//!
//! - `put_if_absent` → `INSERT OR IGNORE`
//! - `update_peer` → `INSERT ... ON CONFLICT DO UPDATE` / `DELETE`
//! - `atomic_increment` → `INSERT ... ON CONFLICT DO UPDATE SET completed = completed + ?`
use std::collections::BTreeMap;
use std::net::IpAddr;
use std::panic::Location;
use std::str::FromStr;
use std::time::Duration;

use bittorrent_primitives::info_hash::InfoHash;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::rusqlite::{params, OptionalExtension};
use r2d2_sqlite::SqliteConnectionManager;
use swarm_tracker_clock::conv::{timestamp_to_unix_millis, unix_millis_to_timestamp};
use swarm_tracker_configuration::Driver;
use swarm_tracker_primitives::peer::{PeerEntry, PeerId};
use swarm_tracker_primitives::swarm::Swarm;

use super::{Counter, Error, PeerUpdate, SwarmIter, SwarmStorage};
use crate::SWARM_REGISTRY_LOG_TARGET;

const DRIVER: Driver = Driver::Sqlite3;

/// How long a connection waits on a locked database before reporting a conflict.
const BUSY_TIMEOUT: Duration = Duration::from_secs(2);

pub struct SqliteSwarmStorage {
    pool: Pool<SqliteConnectionManager>,
}

impl SqliteSwarmStorage {
    /// It instantiates a new `SQLite3` swarm storage and creates its tables.
    ///
    /// # Errors
    ///
    /// Will return `Error` if the database file cannot be opened or the tables
    /// cannot be created.
    pub fn new(db_path: &str) -> Result<Self, Error> {
        let manager = SqliteConnectionManager::file(db_path).with_init(|conn| conn.busy_timeout(BUSY_TIMEOUT));
        let pool = r2d2::Pool::builder().build(manager).map_err(|e| (e, DRIVER))?;

        let storage = Self { pool };

        storage.create_tables()?;

        Ok(storage)
    }

    fn connection(&self) -> Result<PooledConnection<SqliteConnectionManager>, Error> {
        self.pool.get().map_err(|e| Error::from((e, DRIVER)))
    }

    fn create_tables(&self) -> Result<(), Error> {
        let create_swarms_table = "
        CREATE TABLE IF NOT EXISTS swarms (
            info_hash TEXT PRIMARY KEY NOT NULL,
            completed INTEGER DEFAULT 0 NOT NULL
        );";

        let create_peers_table = "
        CREATE TABLE IF NOT EXISTS peers (
            info_hash TEXT NOT NULL,
            peer_id BLOB NOT NULL,
            ip TEXT NOT NULL,
            port INTEGER NOT NULL,
            uploaded INTEGER NOT NULL,
            downloaded INTEGER NOT NULL,
            bytes_left INTEGER NOT NULL,
            last_announce INTEGER NOT NULL,
            PRIMARY KEY (info_hash, peer_id)
        );";

        let conn = self.connection()?;

        conn.execute(create_swarms_table, [])?;
        conn.execute(create_peers_table, [])?;

        Ok(())
    }

    /// Drops the tables. Only used to reset test databases.
    ///
    /// # Errors
    ///
    /// Will return `Error` if the tables cannot be dropped.
    pub fn drop_tables(&self) -> Result<(), Error> {
        let conn = self.connection()?;

        conn.execute("DROP TABLE IF EXISTS peers;", [])?;
        conn.execute("DROP TABLE IF EXISTS swarms;", [])?;

        Ok(())
    }
}

impl SwarmStorage for SqliteSwarmStorage {
    fn get_swarm(&self, info_hash: &InfoHash) -> Result<Option<Swarm>, Error> {
        load_swarm(&self.pool, info_hash)
    }

    fn put_if_absent(&self, swarm: Swarm) -> Result<bool, Error> {
        let conn = self.connection()?;

        let inserted = conn.execute(
            "INSERT OR IGNORE INTO swarms (info_hash, completed) VALUES (?1, ?2)",
            params![swarm.info_hash.to_hex_string(), to_sql_integer(swarm.completed)],
        )?;

        let created = inserted == 1;

        if created {
            for (peer_id, entry) in &swarm.peers {
                upsert_peer(&conn, &swarm.info_hash, peer_id, entry)?;
            }
        }

        Ok(created)
    }

    fn update_peer(&self, info_hash: &InfoHash, peer_id: &PeerId, update: PeerUpdate) -> Result<(), Error> {
        let conn = self.connection()?;

        match update {
            PeerUpdate::Upsert(entry) => {
                conn.execute(
                    "INSERT OR IGNORE INTO swarms (info_hash, completed) VALUES (?1, 0)",
                    [info_hash.to_hex_string()],
                )?;
                upsert_peer(&conn, info_hash, peer_id, &entry)
            }
            PeerUpdate::Tombstone => {
                conn.execute(
                    "DELETE FROM peers WHERE info_hash = ?1 AND peer_id = ?2",
                    params![info_hash.to_hex_string(), peer_id.as_bytes()],
                )?;
                Ok(())
            }
        }
    }

    fn atomic_increment(&self, info_hash: &InfoHash, counter: Counter, delta: u64) -> Result<(), Error> {
        let conn = self.connection()?;

        let statement = match counter {
            Counter::Completed => {
                "INSERT INTO swarms (info_hash, completed) VALUES (?1, ?2)
                 ON CONFLICT (info_hash) DO UPDATE SET completed = completed + excluded.completed"
            }
        };

        conn.execute(statement, params![info_hash.to_hex_string(), to_sql_integer(delta)])?;

        Ok(())
    }

    fn scan_swarms(&self) -> Result<SwarmIter, Error> {
        let conn = self.connection()?;

        let mut stmt = conn.prepare("SELECT info_hash FROM swarms")?;

        let info_hashes = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<String>, _>>()?;

        let pool = self.pool.clone();

        // Swarms are loaded one at a time while iterating. A swarm that fails
        // to load is logged and skipped.
        let swarms = info_hashes.into_iter().filter_map(move |hex| {
            let loaded = parse_info_hash(&hex).and_then(|info_hash| load_swarm(&pool, &info_hash));

            match loaded {
                Ok(swarm) => swarm,
                Err(err) => {
                    tracing::warn!(target: SWARM_REGISTRY_LOG_TARGET, info_hash = %hex, "skipping swarm in scan: {err}");
                    None
                }
            }
        });

        Ok(Box::new(swarms))
    }
}

fn upsert_peer(
    conn: &PooledConnection<SqliteConnectionManager>,
    info_hash: &InfoHash,
    peer_id: &PeerId,
    entry: &PeerEntry,
) -> Result<(), Error> {
    conn.execute(
        "INSERT INTO peers (info_hash, peer_id, ip, port, uploaded, downloaded, bytes_left, last_announce)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
         ON CONFLICT (info_hash, peer_id) DO UPDATE SET
            ip = excluded.ip,
            port = excluded.port,
            uploaded = excluded.uploaded,
            downloaded = excluded.downloaded,
            bytes_left = excluded.bytes_left,
            last_announce = excluded.last_announce",
        params![
            info_hash.to_hex_string(),
            peer_id.as_bytes(),
            entry.ip.to_string(),
            entry.port,
            to_sql_integer(entry.uploaded),
            to_sql_integer(entry.downloaded),
            to_sql_integer(entry.left),
            timestamp_to_unix_millis(entry.last_announce),
        ],
    )?;

    Ok(())
}

fn load_swarm(pool: &Pool<SqliteConnectionManager>, info_hash: &InfoHash) -> Result<Option<Swarm>, Error> {
    let conn = pool.get().map_err(|e| Error::from((e, DRIVER)))?;

    let hex = info_hash.to_hex_string();

    let completed: Option<i64> = conn
        .query_row("SELECT completed FROM swarms WHERE info_hash = ?1", [&hex], |row| row.get(0))
        .optional()?;

    let Some(completed) = completed else {
        return Ok(None);
    };

    let mut stmt = conn.prepare(
        "SELECT peer_id, ip, port, uploaded, downloaded, bytes_left, last_announce FROM peers WHERE info_hash = ?1",
    )?;

    let rows = stmt
        .query_map([&hex], |row| {
            Ok(PeerRow {
                peer_id: row.get(0)?,
                ip: row.get(1)?,
                port: row.get(2)?,
                uploaded: row.get(3)?,
                downloaded: row.get(4)?,
                bytes_left: row.get(5)?,
                last_announce: row.get(6)?,
            })
        })?
        .collect::<Result<Vec<PeerRow>, _>>()?;

    let mut peers = BTreeMap::new();

    for row in rows {
        let (peer_id, entry) = row.into_peer()?;
        peers.insert(peer_id, entry);
    }

    Ok(Some(Swarm {
        info_hash: *info_hash,
        peers,
        completed: from_sql_integer(completed),
    }))
}

struct PeerRow {
    peer_id: Vec<u8>,
    ip: String,
    port: u16,
    uploaded: i64,
    downloaded: i64,
    bytes_left: i64,
    last_announce: i64,
}

impl PeerRow {
    #[track_caller]
    fn into_peer(self) -> Result<(PeerId, PeerEntry), Error> {
        let ip = IpAddr::from_str(&self.ip).map_err(|_| Error::CorruptedRecord {
            reason: format!("invalid peer ip `{}`", self.ip),
            location: Location::caller(),
            driver: DRIVER,
        })?;

        Ok((
            PeerId::new(self.peer_id),
            PeerEntry {
                ip,
                port: self.port,
                uploaded: from_sql_integer(self.uploaded),
                downloaded: from_sql_integer(self.downloaded),
                left: from_sql_integer(self.bytes_left),
                last_announce: unix_millis_to_timestamp(self.last_announce),
            },
        ))
    }
}

#[track_caller]
fn parse_info_hash(hex: &str) -> Result<InfoHash, Error> {
    InfoHash::from_str(hex).map_err(|_| Error::CorruptedRecord {
        reason: format!("invalid info hash `{hex}`"),
        location: Location::caller(),
        driver: DRIVER,
    })
}

fn to_sql_integer(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn from_sql_integer(value: i64) -> u64 {
    u64::try_from(value).unwrap_or_default()
}
