//! Field-by-field scanning of an encoded message.
//!
//! A [`Cursor`] walks the tagged values of one message. Each call to
//! [`advance`](Cursor::advance) reads a tag; the caller then either decodes
//! the value with one of the [`ScalarRead`] accessors, [`bytes`](Cursor::bytes),
//! [`sub_message`](Cursor::sub_message) and friends, or discards it with
//! [`skip`](Cursor::skip). Exactly one value must be consumed per tag, or the
//! cursor loses its alignment with the stream.
//!
//! ```
//! use protoscan_core::{Cursor, ScalarRead};
//!
//! // field 1 = int64 150, field 2 = "hi"
//! let data = [0x08, 0x96, 0x01, 0x12, 0x02, b'h', b'i'];
//!
//! let mut msg = Cursor::new(&data);
//! let mut name = None;
//! while msg.advance() {
//!     match msg.field_number() {
//!         2 => name = Some(msg.string()?),
//!         _ => msg.skip()?,
//!     }
//! }
//!
//! assert_eq!(msg.error(), None);
//! assert_eq!(name, Some("hi"));
//! # Ok::<(), protoscan_core::Error>(())
//! ```
//!
//! ## Errors
//!
//! The first wire-level failure is latched. After that `advance` returns
//! false and every decode returns the latched error, until the cursor is
//! re-armed with [`reset`](Cursor::reset) or [`rewind`](Cursor::rewind).

use crate::decode;
use crate::error::{Error, Result};
use crate::packed::PackedIter;
use crate::scalar::{Scalar, ScalarRead};
use crate::wire::{split_tag, WireType};
use tracing::{debug, trace};

/// Scanning position over an encoded protobuf message
#[derive(Debug, Clone, Default)]
pub struct Cursor<'a> {
    data: &'a [u8],
    index: usize,
    field_number: u32,
    wire_type: WireType,
    error: Option<Error>,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor at the start of `data`
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            index: 0,
            field_number: 0,
            wire_type: WireType::Varint,
            error: None,
        }
    }

    /// Re-arm the cursor over a new buffer, clearing all scanning state
    pub fn reset(&mut self, data: &'a [u8]) {
        *self = Self::new(data);
    }

    /// Re-arm the cursor over the same buffer from offset 0
    pub fn rewind(&mut self) {
        self.reset(self.data);
    }

    /// Move to the next tagged value.
    ///
    /// Returns false at the end of the buffer or when the tag could not be
    /// read; check [`error`](Self::error) to tell the two apart.
    pub fn advance(&mut self) -> bool {
        if self.error.is_some() || self.index >= self.data.len() {
            return false;
        }

        let tag = decode::varint64(self.data, self.index)
            .and_then(|(tag, index)| split_tag(tag).map(|split| (split, index)));

        match tag {
            Ok(((field_number, wire_type), index)) => {
                self.field_number = field_number;
                self.wire_type = wire_type;
                self.index = index;
                true
            }
            Err(err) => {
                self.fail(err);
                false
            }
        }
    }

    /// Field number of the current value
    pub fn field_number(&self) -> u32 {
        self.field_number
    }

    /// Wire type of the current value
    pub fn wire_type(&self) -> WireType {
        self.wire_type
    }

    /// The latched error, if scanning stopped on corrupt or truncated input
    pub fn error(&self) -> Option<Error> {
        self.error
    }

    /// Current read offset into [`data`](Self::data)
    pub fn index(&self) -> usize {
        self.index
    }

    /// Length of the scanned buffer
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the scanned buffer is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The whole scanned buffer
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// The unread part of the buffer
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.index..]
    }

    /// Consume the current value without decoding it.
    ///
    /// Group markers have no payload and are left alone; use
    /// [`group`](Self::group) to step over a whole group.
    pub fn skip(&mut self) -> Result<()> {
        let wire_type = self.wire_type;
        self.step(|data, index| decode::skip_value(data, index, wire_type).map(|index| ((), index)))
    }

    /// Borrow the payload of a length-delimited value
    pub fn bytes(&mut self) -> Result<&'a [u8]> {
        self.step(decode::length_delimited)
    }

    /// Borrow a length-delimited value as UTF-8 text.
    ///
    /// Invalid UTF-8 is reported but not latched: the payload has been
    /// consumed and the following fields can still be read.
    pub fn string(&mut self) -> Result<&'a str> {
        let bytes = self.bytes()?;
        std::str::from_utf8(bytes).map_err(|_| Error::InvalidUtf8 {
            offset: self.index - bytes.len(),
        })
    }

    /// Open an embedded message as a new cursor over the same buffer
    pub fn sub_message(&mut self) -> Result<Cursor<'a>> {
        self.bytes().map(Cursor::new)
    }

    /// Borrow the encoded bytes of an embedded message.
    ///
    /// Useful for handing the message to a schema-aware decoder. The payload
    /// is consumed, exactly as with [`sub_message`](Self::sub_message).
    pub fn raw_message_bytes(&mut self) -> Result<&'a [u8]> {
        self.bytes()
    }

    /// Open the current packed repeated field for manual iteration
    pub fn iter_packed(&mut self) -> Result<PackedIter<'a>> {
        let field_number = self.field_number;
        self.bytes().map(|data| PackedIter::new(data, field_number))
    }

    /// Append the values of a repeated field to `buf`.
    ///
    /// An unpacked occurrence contributes one value; a packed run contributes
    /// all of its values. When `buf` has no capacity yet it is sized from a
    /// prescan of the run.
    pub fn read_repeated<K: Scalar>(&mut self, buf: &mut Vec<K::Value>) -> Result<()> {
        if self.wire_type == K::WIRE_TYPE {
            buf.push(self.read::<K>()?);
            return Ok(());
        }

        let payload = self.bytes()?;
        if buf.capacity() == 0 {
            buf.reserve_exact(K::count(payload));
        }

        let mut index = 0;
        while index < payload.len() {
            match K::decode(payload, index) {
                Ok((value, next)) => {
                    buf.push(value);
                    index = next;
                }
                Err(err) => return Err(self.fail(err)),
            }
        }

        Ok(())
    }

    /// Consume a group and borrow its encoded contents.
    ///
    /// Must be called right after [`advance`](Self::advance) returned a
    /// `StartGroup` tag. Scans forward to the matching `EndGroup` and returns
    /// the bytes between the two tags. Nested groups are depth counted, so
    /// groups nested under the same field number are handled. Only the
    /// outermost end tag is checked against the start tag's field number.
    pub fn group(&mut self) -> Result<&'a [u8]> {
        if let Some(err) = self.error {
            return Err(err);
        }
        if self.wire_type != WireType::StartGroup {
            return Err(Error::InvalidWireType {
                value: self.wire_type.as_u8(),
            });
        }

        let expected = self.field_number;
        let start = self.index;
        let mut depth = 0usize;

        loop {
            let tag_start = self.index;
            if !self.advance() {
                return Err(match self.error {
                    Some(err) => err,
                    None => self.fail(Error::UnexpectedEof),
                });
            }

            match self.wire_type {
                WireType::StartGroup => depth += 1,
                WireType::EndGroup if depth > 0 => depth -= 1,
                WireType::EndGroup if self.field_number == expected => {
                    debug!("Group {} spans {}..{}", expected, start, tag_start);
                    return Ok(&self.data[start..tag_start]);
                }
                WireType::EndGroup => {
                    let found = self.field_number;
                    return Err(self.fail(Error::GroupMismatch { expected, found }));
                }
                _ => self.skip()?,
            }
        }
    }

    /// Run one decode step at the current offset, latching any failure
    fn step<T>(&mut self, op: impl FnOnce(&'a [u8], usize) -> Result<(T, usize)>) -> Result<T> {
        if let Some(err) = self.error {
            return Err(err);
        }

        match op(self.data, self.index) {
            Ok((value, index)) => {
                self.index = index;
                Ok(value)
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    fn fail(&mut self, err: Error) -> Error {
        if err.is_fatal() && self.error.is_none() {
            trace!(
                "Scan stopped at offset {} (field {}): {}",
                self.index,
                self.field_number,
                err
            );
            self.error = Some(err);
        }
        err
    }
}

impl ScalarRead for Cursor<'_> {
    fn read<K: Scalar>(&mut self) -> Result<K::Value> {
        self.step(K::decode)
    }
}
