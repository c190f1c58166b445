use thiserror::Error;

/// Reasons a bencoded message is rejected.
///
/// Positions are byte offsets into the input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unexpected end of input at byte {pos}")]
    UnexpectedEnd { pos: usize },

    #[error("unexpected byte {byte:#04x} at byte {pos}")]
    InvalidByte { byte: u8, pos: usize },

    #[error("invalid integer at byte {pos}: {reason}")]
    InvalidInteger { pos: usize, reason: &'static str },

    #[error("invalid byte string length at byte {pos}")]
    InvalidLength { pos: usize },

    #[error("dictionary key at byte {pos} is not greater than the previous key")]
    UnsortedKeys { pos: usize },

    #[error("nesting deeper than {max} levels at byte {pos}")]
    RecursionLimit { max: usize, pos: usize },

    #[error("trailing bytes after the value at byte {pos}")]
    TrailingBytes { pos: usize },
}
