//! Bounded iteration over one packed repeated field.
//!
//! A [`PackedIter`] is obtained from [`Cursor::iter_packed`](crate::Cursor::iter_packed)
//! and walks the payload of a single packed field. It has no notion of tags:
//! the caller decides which scalar kind to pull next, and can count or skip
//! elements without decoding them.

use crate::decode::{self, MAX_VARINT64_LEN};
use crate::error::{Error, Result};
use crate::scalar::{Scalar, ScalarRead};
use crate::wire::WireType;
use std::marker::PhantomData;

/// Cursor over the elements of a packed repeated field
#[derive(Debug, Clone)]
pub struct PackedIter<'a> {
    data: &'a [u8],
    index: usize,
    field_number: u32,
}

impl<'a> PackedIter<'a> {
    /// Creates an iterator over a packed payload belonging to `field_number`
    pub fn new(data: &'a [u8], field_number: u32) -> Self {
        Self {
            data,
            index: 0,
            field_number,
        }
    }

    /// Returns true while undecoded bytes remain.
    ///
    /// Reading a value moves the iterator forward on its own; this is only
    /// the loop condition.
    pub fn has_next(&self) -> bool {
        self.index < self.data.len()
    }

    /// Field number of the packed field this run was read from
    pub fn field_number(&self) -> u32 {
        self.field_number
    }

    /// Current offset within the packed payload
    pub fn index(&self) -> usize {
        self.index
    }

    /// The undecoded part of the payload
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.index..]
    }

    /// Total number of elements in the run, read or not.
    ///
    /// Varint runs are counted by their terminating bytes, fixed-width runs
    /// by dividing by the element width. Only `Varint`, `Fixed32` and
    /// `Fixed64` describe packed elements; anything else is an error.
    pub fn count(&self, wire_type: WireType) -> Result<usize> {
        decode::packed_count(wire_type, self.data)
    }

    /// Move past `n` elements of the given encoding without decoding them.
    ///
    /// On failure the iterator does not move.
    pub fn skip(&mut self, wire_type: WireType, n: usize) -> Result<()> {
        let index = match wire_type {
            WireType::Fixed32 | WireType::Fixed64 => {
                let width = wire_type.fixed_width().unwrap_or_default();
                n.checked_mul(width)
                    .and_then(|len| self.index.checked_add(len))
                    .filter(|&end| end <= self.data.len())
                    .ok_or(Error::UnexpectedEof)?
            }
            WireType::Varint => {
                let mut index = self.index;
                for _ in 0..n {
                    let rest = &self.data[index..];
                    let len = match rest.iter().take(MAX_VARINT64_LEN).position(|&b| b < 0x80) {
                        Some(len) => len,
                        None if rest.len() >= MAX_VARINT64_LEN => return Err(Error::IntegerOverflow),
                        None => return Err(Error::UnexpectedEof),
                    };
                    index += len + 1;
                }
                index
            }
            other => {
                return Err(Error::InvalidWireType {
                    value: other.as_u8(),
                })
            }
        };

        self.index = index;
        Ok(())
    }

    /// Turn the remaining elements into a std iterator of kind `K`.
    ///
    /// The iterator yields at most one error and then stops.
    pub fn values<K: Scalar>(self) -> Values<'a, K> {
        Values {
            iter: self,
            failed: false,
            kind: PhantomData,
        }
    }
}

impl ScalarRead for PackedIter<'_> {
    fn read<K: Scalar>(&mut self) -> Result<K::Value> {
        let (value, index) = K::decode(self.data, self.index)?;
        self.index = index;
        Ok(value)
    }
}

/// Iterator returned by [`PackedIter::values`]
#[derive(Debug, Clone)]
pub struct Values<'a, K> {
    iter: PackedIter<'a>,
    failed: bool,
    kind: PhantomData<K>,
}

impl<K: Scalar> Iterator for Values<'_, K> {
    type Item = Result<K::Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || !self.iter.has_next() {
            return None;
        }

        let value = self.iter.read::<K>();
        self.failed = value.is_err();
        Some(value)
    }
}
