//! The `event` of an announce request.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Announce event. A regular keep-alive announce carries no event.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Copy, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnnounceEvent {
    /// The first announce of a peer.
    Started,
    /// The peer is leaving the swarm.
    Stopped,
    /// The peer finished downloading.
    Completed,
    /// Regular announce.
    #[default]
    None,
}

impl FromStr for AnnounceEvent {
    type Err = String;

    /// The empty string is accepted as "no event", as some clients send
    /// `event=` on keep-alive announces.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "started" => Ok(Self::Started),
            "stopped" => Ok(Self::Stopped),
            "completed" => Ok(Self::Completed),
            "" | "empty" => Ok(Self::None),
            other => Err(other.to_owned()),
        }
    }
}

impl fmt::Display for AnnounceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Started => write!(f, "started"),
            Self::Stopped => write!(f, "stopped"),
            Self::Completed => write!(f, "completed"),
            Self::None => write!(f, ""),
        }
    }
}
