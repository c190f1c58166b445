use std::collections::BTreeMap;

use crate::error::DecodeError;
use crate::value::Value;

const DEFAULT_MAX_RECURSION: usize = 50;

/// Options for decoding bencode.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DecodeOpt {
    max_recursion: usize,
    check_key_sort: bool,
    enforce_full_decode: bool,
}

impl DecodeOpt {
    /// Create a new `DecodeOpt` object.
    #[must_use]
    pub fn new(max_recursion: usize, check_key_sort: bool, enforce_full_decode: bool) -> DecodeOpt {
        DecodeOpt {
            max_recursion,
            check_key_sort,
            enforce_full_decode,
        }
    }

    /// Maximum nesting of lists and dictionaries.
    #[must_use]
    pub fn max_recursion(&self) -> usize {
        self.max_recursion
    }

    /// Whether dictionary keys must be strictly increasing (sorted, no duplicates).
    #[must_use]
    pub fn check_key_sort(&self) -> bool {
        self.check_key_sort
    }

    /// Whether bytes after the first complete value are an error.
    #[must_use]
    pub fn enforce_full_decode(&self) -> bool {
        self.enforce_full_decode
    }
}

impl Default for DecodeOpt {
    fn default() -> DecodeOpt {
        DecodeOpt::new(DEFAULT_MAX_RECURSION, true, true)
    }
}

pub(crate) fn decode(bytes: &[u8], opt: DecodeOpt) -> Result<Value, DecodeError> {
    let mut decoder = Decoder { bytes, pos: 0, opt };

    let value = decoder.value(0)?;

    if opt.enforce_full_decode() && decoder.pos != bytes.len() {
        return Err(DecodeError::TrailingBytes { pos: decoder.pos });
    }

    Ok(value)
}

struct Decoder<'a> {
    bytes: &'a [u8],
    pos: usize,
    opt: DecodeOpt,
}

impl<'a> Decoder<'a> {
    fn peek(&self) -> Result<u8, DecodeError> {
        self.bytes
            .get(self.pos)
            .copied()
            .ok_or(DecodeError::UnexpectedEnd { pos: self.pos })
    }

    fn value(&mut self, depth: usize) -> Result<Value, DecodeError> {
        match self.peek()? {
            b'i' => {
                self.pos += 1;
                Ok(Value::Int(self.integer(b'e')?))
            }
            b'0'..=b'9' => Ok(Value::Bytes(self.byte_string()?.to_vec())),
            b'l' => {
                self.enter(depth)?;
                let mut list = Vec::new();
                while self.peek()? != b'e' {
                    list.push(self.value(depth + 1)?);
                }
                self.pos += 1;
                Ok(Value::List(list))
            }
            b'd' => {
                self.enter(depth)?;
                let mut dict = BTreeMap::new();
                let mut previous_key: Option<&[u8]> = None;
                while self.peek()? != b'e' {
                    let key_pos = self.pos;
                    let key = self.byte_string()?;

                    if let Some(previous_key) = previous_key {
                        if self.opt.check_key_sort() && key <= previous_key {
                            return Err(DecodeError::UnsortedKeys { pos: key_pos });
                        }
                    }

                    let value = self.value(depth + 1)?;
                    dict.insert(key.to_vec(), value);
                    previous_key = Some(key);
                }
                self.pos += 1;
                Ok(Value::Dict(dict))
            }
            byte => Err(DecodeError::InvalidByte { byte, pos: self.pos }),
        }
    }

    fn enter(&mut self, depth: usize) -> Result<(), DecodeError> {
        if depth >= self.opt.max_recursion() {
            return Err(DecodeError::RecursionLimit {
                max: self.opt.max_recursion(),
                pos: self.pos,
            });
        }
        self.pos += 1;
        Ok(())
    }

    /// Parses `<length>:<bytes>` and returns the bytes borrowed from the input.
    fn byte_string(&mut self) -> Result<&'a [u8], DecodeError> {
        let start = self.pos;

        let byte = self.peek()?;
        if !byte.is_ascii_digit() {
            return Err(DecodeError::InvalidByte { byte, pos: start });
        }

        let length = self.integer(b':')?;
        let length = usize::try_from(length).map_err(|_| DecodeError::InvalidLength { pos: start })?;

        let end = self
            .pos
            .checked_add(length)
            .ok_or(DecodeError::InvalidLength { pos: start })?;

        let input: &'a [u8] = self.bytes;
        let bytes = input
            .get(self.pos..end)
            .ok_or(DecodeError::UnexpectedEnd { pos: self.bytes.len() })?;

        self.pos = end;

        Ok(bytes)
    }

    /// Parses a canonical base-10 integer up to (and consuming) `terminator`.
    fn integer(&mut self, terminator: u8) -> Result<i64, DecodeError> {
        let start = self.pos;

        let end = self.bytes[start..]
            .iter()
            .position(|byte| *byte == terminator)
            .map(|offset| start + offset)
            .ok_or(DecodeError::UnexpectedEnd { pos: self.bytes.len() })?;

        let digits = &self.bytes[start..end];

        let invalid = |reason| DecodeError::InvalidInteger { pos: start, reason };

        let unsigned = digits.strip_prefix(b"-").unwrap_or(digits);

        if unsigned.is_empty() {
            return Err(invalid("no digits"));
        }
        if !unsigned.iter().all(u8::is_ascii_digit) {
            return Err(invalid("non-digit character"));
        }
        if unsigned.len() > 1 && unsigned[0] == b'0' {
            return Err(invalid("leading zero"));
        }
        if digits == b"-0" {
            return Err(invalid("negative zero"));
        }

        // Only ASCII digits and an optional leading '-' at this point.
        let text = std::str::from_utf8(digits).map_err(|_| invalid("non-digit character"))?;
        let number = text.parse::<i64>().map_err(|_| invalid("out of range"))?;

        self.pos = end + 1;

        Ok(number)
    }
}
