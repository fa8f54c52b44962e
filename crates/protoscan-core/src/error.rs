//! Error types for the protoscan-core library.
//!
//! Every decode primitive returns a [`Result`]; a [`Cursor`](crate::Cursor)
//! additionally latches the first wire-level error it sees. The error is
//! `Copy` so the latched value can be handed out and compared freely.

use thiserror::Error;

/// Result type alias for protoscan operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for all scanning and decoding operations
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A varint did not terminate within the width of its target integer
    #[error("integer overflow: varint is too long for the target type")]
    IntegerOverflow,

    /// A length prefix is negative when reinterpreted or overflows the offset
    #[error("invalid length: length-delimited prefix is out of range")]
    InvalidLength,

    /// The input ended before the value being read was complete
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// A tag carried one of the two unassigned wire types
    #[error("invalid wire type {value}")]
    InvalidWireType {
        /// The raw 3-bit wire type
        value: u8,
    },

    /// A tag carried a field number outside `1..=MAX_FIELD_NUMBER`
    #[error("invalid field number {number}: must be between 1 and {}", crate::MAX_FIELD_NUMBER)]
    InvalidFieldNumber {
        /// The decoded field number
        number: u64,
    },

    /// An end-group tag closed a group with a different field number
    #[error("end group for field {found} does not match start group for field {expected}")]
    GroupMismatch {
        /// Field number of the open group
        expected: u32,
        /// Field number carried by the end-group tag
        found: u32,
    },

    /// A string payload was not valid UTF-8
    #[error("invalid UTF-8 in string payload at offset {offset}")]
    InvalidUtf8 {
        /// Byte offset of the payload within the scanned buffer
        offset: usize,
    },
}

impl Error {
    /// Returns true if the input ended early, as opposed to being malformed
    pub fn is_truncation(&self) -> bool {
        matches!(self, Self::UnexpectedEof)
    }

    /// Returns true if the error leaves the byte stream misaligned.
    ///
    /// Only these errors are latched by a cursor. A bad UTF-8 string has
    /// already been consumed in full, so scanning can safely go on.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::InvalidUtf8 { .. })
    }
}
