use std::str::FromStr;

use bittorrent_primitives::info_hash::InfoHash;
use percent_encoding::{percent_encode, NON_ALPHANUMERIC};

pub fn sample_info_hash() -> InfoHash {
    InfoHash::from_str("9c38422213e30bff212b30c360d26f9a02136422").unwrap() // DevSkim: ignore DS173237
}

pub fn sample_info_hash_two() -> InfoHash {
    InfoHash::from_str("3b245504cf5f11bbdbe1201cea6a6bf45aee1bc0").unwrap() // DevSkim: ignore DS173237
}

/// The info-hash as a client puts it in the URL query.
pub fn url_encoded(info_hash: &InfoHash) -> String {
    percent_encode(&info_hash.bytes(), NON_ALPHANUMERIC).to_string()
}

/// Builds the query of an announce request.
///
/// It starts with every mandatory param set to a leecher announcing for the
/// first time.
#[derive(Debug, Clone)]
pub struct AnnounceQueryBuilder {
    params: Vec<(&'static str, String)>,
}

impl AnnounceQueryBuilder {
    pub fn new(info_hash: &InfoHash) -> Self {
        Self {
            params: vec![
                ("info_hash", url_encoded(info_hash)),
                ("peer_id", "-qB00000000000000009".to_owned()),
                ("port", "17548".to_owned()),
                ("uploaded", "0".to_owned()),
                ("downloaded", "0".to_owned()),
                ("left", "100".to_owned()),
            ],
        }
    }

    /// Sets a param, replacing its previous value.
    pub fn with(self, name: &'static str, value: &str) -> Self {
        self.without(name).push(name, value)
    }

    pub fn without(mut self, name: &'static str) -> Self {
        self.params.retain(|(param_name, _)| *param_name != name);
        self
    }

    fn push(mut self, name: &'static str, value: &str) -> Self {
        self.params.push((name, value.to_owned()));
        self
    }

    pub fn query(&self) -> String {
        self.params
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("&")
    }
}
