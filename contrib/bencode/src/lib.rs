//! Decoding and encoding for the bencode format used on the BitTorrent wire.
//!
//! Grammar:
//!
//! ```text
//! integer     i<base-10 digits, optional leading '-'>e   e.g. i42e, i-3e
//! byte string <length>:<bytes>                        e.g. 4:spam
//! list        l<values>e                              e.g. l4:spami42ee
//! dictionary  d<byte-string key><value>...e           keys sorted by raw bytes
//! ```
//!
//! Encoding is total: every [`Value`] has exactly one encoding, and
//! dictionary keys are always written in raw byte order because they live in
//! a `BTreeMap<Vec<u8>, Value>`.
//!
//! Decoding is strict and fails closed. Any deviation from the canonical
//! form (leading zeros, `-0`, unsorted or duplicated keys, trailing bytes,
//! truncated input) is reported as a [`DecodeError`] instead of being
//! repaired.
//!
//! ```rust
//! use swarm_tracker_contrib_bencode::{ben_bytes, ben_int, ben_map, Value};
//!
//! let message = ben_map! {
//!     "interval" => ben_int!(1800),
//!     "failure reason" => ben_bytes!("Missing Argument (uploaded)")
//! };
//!
//! let encoded = message.encode();
//!
//! assert_eq!(
//!     encoded,
//!     b"d14:failure reason27:Missing Argument (uploaded)8:intervali1800ee".to_vec()
//! );
//! assert_eq!(Value::decode(&encoded).unwrap(), message);
//! ```
mod decode;
mod error;
mod value;

pub use decode::DecodeOpt;
pub use error::DecodeError;
pub use value::Value;

/// Construct a `Value::Dict` from a list of `key => value` pairs.
///
/// Keys are anything convertible to bytes (`&str`, `&[u8]`, `Vec<u8>`).
#[macro_export]
macro_rules! ben_map {
( $($key:expr => $val:expr),* ) => {
        {
            #[allow(unused_mut)]
            let mut bencode_map = ::std::collections::BTreeMap::<::std::vec::Vec<u8>, $crate::Value>::new();
            $(
                bencode_map.insert(::std::convert::Into::<::std::vec::Vec<u8>>::into($key), $val);
            )*
            $crate::Value::Dict(bencode_map)
        }
    }
}

/// Construct a `Value::List` from a list of values.
#[macro_export]
macro_rules! ben_list {
    ( $($ben:expr),* ) => {
        {
            #[allow(unused_mut)]
            let mut bencode_list = ::std::vec::Vec::<$crate::Value>::new();
            $(
                bencode_list.push($ben);
            )*
            $crate::Value::List(bencode_list)
        }
    }
}

/// Construct a `Value::Bytes` from anything convertible to a byte vector.
#[macro_export]
macro_rules! ben_bytes {
    ( $ben:expr ) => {
        $crate::Value::Bytes(::std::convert::Into::<::std::vec::Vec<u8>>::into($ben))
    };
}

/// Construct a `Value::Int` from any integer losslessly convertible to `i64`.
#[macro_export]
macro_rules! ben_int {
    ( $ben:expr ) => {
        $crate::Value::Int(::std::convert::Into::<i64>::into($ben))
    };
}
