use std::collections::BTreeMap;

use crate::decode::{self, DecodeOpt};
use crate::error::DecodeError;

/// A bencoded value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    Bytes(Vec<u8>),
    List(Vec<Value>),
    Dict(BTreeMap<Vec<u8>, Value>),
}

impl Value {
    /// Decode a complete bencoded message with the default (strict) options.
    ///
    /// # Errors
    ///
    /// Will return a `DecodeError` if the input is not exactly one canonical
    /// bencoded value.
    pub fn decode(bytes: &[u8]) -> Result<Value, DecodeError> {
        decode::decode(bytes, DecodeOpt::default())
    }

    /// Decode with custom options.
    ///
    /// # Errors
    ///
    /// Will return a `DecodeError` if the input violates the options.
    pub fn decode_with_opt(bytes: &[u8], opt: DecodeOpt) -> Result<Value, DecodeError> {
        decode::decode(bytes, opt)
    }

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buffer = Vec::new();
        self.write(&mut buffer);
        buffer
    }

    /// Append the encoding of this value to `w`.
    ///
    /// Uses an explicit stack so deeply nested values cannot overflow the
    /// call stack.
    pub fn write(&self, w: &mut Vec<u8>) {
        enum Token<'a> {
            Value(&'a Value),
            Key(&'a [u8]),
            End,
        }

        let mut stack = vec![Token::Value(self)];

        while let Some(token) = stack.pop() {
            match token {
                Token::Value(Value::Int(n)) => {
                    w.push(b'i');
                    w.extend_from_slice(n.to_string().as_bytes());
                    w.push(b'e');
                }
                Token::Value(Value::Bytes(bytes)) => write_bytes(w, bytes),
                Token::Key(key) => write_bytes(w, key),
                Token::Value(Value::List(list)) => {
                    w.push(b'l');
                    stack.push(Token::End);
                    stack.extend(list.iter().rev().map(Token::Value));
                }
                Token::Value(Value::Dict(dict)) => {
                    w.push(b'd');
                    stack.push(Token::End);
                    for (key, value) in dict.iter().rev() {
                        stack.push(Token::Value(value));
                        stack.push(Token::Key(key));
                    }
                }
                Token::End => w.push(b'e'),
            }
        }
    }

    #[must_use]
    pub fn int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// The byte string as UTF-8, if it is one.
    #[must_use]
    pub fn str(&self) -> Option<&str> {
        self.bytes().and_then(|bytes| std::str::from_utf8(bytes).ok())
    }

    #[must_use]
    pub fn list(&self) -> Option<&[Value]> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    #[must_use]
    pub fn dict(&self) -> Option<&BTreeMap<Vec<u8>, Value>> {
        match self {
            Value::Dict(dict) => Some(dict),
            _ => None,
        }
    }

    /// Look up `key` when this value is a dictionary.
    #[must_use]
    pub fn lookup(&self, key: &[u8]) -> Option<&Value> {
        self.dict().and_then(|dict| dict.get(key))
    }
}

fn write_bytes(w: &mut Vec<u8>, bytes: &[u8]) {
    w.extend_from_slice(bytes.len().to_string().as_bytes());
    w.push(b':');
    w.extend_from_slice(bytes);
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Value::Bytes(bytes)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Bytes(s.as_bytes().to_vec())
    }
}
