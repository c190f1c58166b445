//! The URL query parser for the HTTP tracker requests.
//!
//! The tracker cannot use a regular form decoder: `info_hash` and `peer_id`
//! are URL-encoded binary values, and `scrape` repeats `info_hash` once per
//! swarm. [`Query`] keeps every value as sent, still percent-encoded, and
//! allows repeated params. Decoding is done by the request types, which know
//! whether a value is binary or text.
use std::panic::Location;
use std::str::FromStr;

use multimap::MultiMap;
use thiserror::Error;

type ParamName = String;
type ParamValue = String;

/// A parsed URL query.
///
/// ```rust
/// use bittorrent_http_tracker_protocol::v1::query::Query;
///
/// let query = "info_hash=%3B%24U&info_hash=%99%C8".parse::<Query>().unwrap();
///
/// assert_eq!(query.get_param("info_hash"), Some("%3B%24U".to_string()));
/// assert_eq!(
///     query.get_param_vec("info_hash"),
///     Some(vec!["%3B%24U".to_string(), "%99%C8".to_string()])
/// );
/// ```
#[derive(Debug, PartialEq, Default)]
pub struct Query {
    params: MultiMap<ParamName, NameValuePair>,
}

impl Query {
    /// The first value of the param, still percent-encoded.
    #[must_use]
    pub fn get_param(&self, name: &str) -> Option<String> {
        self.params.get(name).map(|pair| pair.value.clone())
    }

    /// Every value of a repeated param, in the order they were sent.
    #[must_use]
    pub fn get_param_vec(&self, name: &str) -> Option<Vec<String>> {
        self.params
            .get_vec(name)
            .map(|pairs| pairs.iter().map(|pair| pair.value.clone()).collect())
    }

    #[must_use]
    pub fn has_param(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }
}

/// Errors that can occur when parsing a raw URL query.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum ParseQueryError {
    /// A param like `=value` has no name.
    #[error("missing param name for param {raw_param} in {location}")]
    MissingParamName {
        location: &'static Location<'static>,
        raw_param: String,
    },
}

impl FromStr for Query {
    type Err = ParseQueryError;

    /// Parses a raw query like `param1=value1&param2=value2`.
    ///
    /// A param without `=` gets the empty value. Empty segments (`a=1&&b=2`)
    /// are ignored.
    fn from_str(raw_query: &str) -> Result<Self, Self::Err> {
        let mut params: MultiMap<ParamName, NameValuePair> = MultiMap::new();

        for raw_param in raw_query.split('&').filter(|raw_param| !raw_param.is_empty()) {
            let pair = raw_param.parse::<NameValuePair>()?;
            params.insert(pair.name.clone(), pair);
        }

        Ok(Self { params })
    }
}

impl From<Vec<(&str, &str)>> for Query {
    fn from(raw_params: Vec<(&str, &str)>) -> Self {
        let mut params: MultiMap<ParamName, NameValuePair> = MultiMap::new();

        for (name, value) in raw_params {
            params.insert(name.to_owned(), NameValuePair::new(name, value));
        }

        Self { params }
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
struct NameValuePair {
    name: ParamName,
    value: ParamValue,
}

impl NameValuePair {
    fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_owned(),
            value: value.to_owned(),
        }
    }
}

impl FromStr for NameValuePair {
    type Err = ParseQueryError;

    fn from_str(raw_param: &str) -> Result<Self, Self::Err> {
        let (name, value) = raw_param.split_once('=').unwrap_or((raw_param, ""));

        if name.is_empty() {
            return Err(ParseQueryError::MissingParamName {
                location: Location::caller(),
                raw_param: raw_param.to_owned(),
            });
        }

        Ok(Self::new(name, value))
    }
}
