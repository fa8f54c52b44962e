//! Primitive value decoders.
//!
//! Every function takes the buffer and a read offset and returns the decoded
//! value together with the offset just past it. Nothing here reads outside
//! `data`, whatever its contents.

use crate::error::{Error, Result};
use crate::wire::WireType;

/// Maximum number of bytes in a varint holding a 32-bit value
pub const MAX_VARINT32_LEN: usize = 5;

/// Maximum number of bytes in a varint holding a 64-bit value
pub const MAX_VARINT64_LEN: usize = 10;

/// Decode a varint of up to 32 bits.
///
/// Value bits beyond bit 31 in the fifth byte are discarded, so negative
/// `int32` values, which are always sent as ten bytes, overflow here and must
/// be read with [`varint64`].
pub fn varint32(data: &[u8], index: usize) -> Result<(u32, usize)> {
    let mut value: u32 = 0;
    let mut index = index;
    let mut shift = 0;

    loop {
        if shift >= 32 {
            return Err(Error::IntegerOverflow);
        }
        let Some(&byte) = data.get(index) else {
            return Err(Error::UnexpectedEof);
        };
        index += 1;

        value |= u32::from(byte & 0x7F) << shift;
        if byte < 0x80 {
            return Ok((value, index));
        }
        shift += 7;
    }
}

/// Decode a varint of up to 64 bits
pub fn varint64(data: &[u8], index: usize) -> Result<(u64, usize)> {
    let mut value: u64 = 0;
    let mut index = index;
    let mut shift = 0;

    loop {
        if shift >= 64 {
            return Err(Error::IntegerOverflow);
        }
        let Some(&byte) = data.get(index) else {
            return Err(Error::UnexpectedEof);
        };
        index += 1;

        value |= u64::from(byte & 0x7F) << shift;
        if byte < 0x80 {
            return Ok((value, index));
        }
        shift += 7;
    }
}

/// Map a zig-zag encoded 32-bit value back to its signed value
pub const fn zigzag32(value: u32) -> i32 {
    ((value >> 1) as i32) ^ -((value & 1) as i32)
}

/// Map a zig-zag encoded 64-bit value back to its signed value
pub const fn zigzag64(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

/// Read 4 little-endian bytes
pub fn fixed32(data: &[u8], index: usize) -> Result<(u32, usize)> {
    let (bytes, index) = take::<4>(data, index)?;
    Ok((u32::from_le_bytes(bytes), index))
}

/// Read 8 little-endian bytes
pub fn fixed64(data: &[u8], index: usize) -> Result<(u64, usize)> {
    let (bytes, index) = take::<8>(data, index)?;
    Ok((u64::from_le_bytes(bytes), index))
}

fn take<const N: usize>(data: &[u8], index: usize) -> Result<([u8; N], usize)> {
    let end = index.checked_add(N).ok_or(Error::UnexpectedEof)?;
    let bytes = data
        .get(index..end)
        .and_then(|chunk| <[u8; N]>::try_from(chunk).ok())
        .ok_or(Error::UnexpectedEof)?;
    Ok((bytes, end))
}

/// Decode the length prefix of a length-delimited value and check that the
/// payload lies within `data`.
///
/// Returns the payload length and the offset where the payload starts.
pub fn length_prefix(data: &[u8], index: usize) -> Result<(usize, usize)> {
    let (len, index) = varint64(data, index)?;

    // A length that would be negative as a signed machine word is garbage.
    if len > isize::MAX as u64 {
        return Err(Error::InvalidLength);
    }
    let len = len as usize;

    let end = index.checked_add(len).ok_or(Error::InvalidLength)?;
    if end > data.len() {
        return Err(Error::UnexpectedEof);
    }

    Ok((len, index))
}

/// Borrow the payload of a length-delimited value
pub fn length_delimited(data: &[u8], index: usize) -> Result<(&[u8], usize)> {
    let (len, start) = length_prefix(data, index)?;
    let end = start + len;
    Ok((&data[start..end], end))
}

/// Advance past the value of the given wire type without decoding it.
///
/// Group markers carry no payload, so they consume nothing.
pub fn skip_value(data: &[u8], index: usize, wire_type: WireType) -> Result<usize> {
    match wire_type {
        WireType::Varint => varint64(data, index).map(|(_, index)| index),
        WireType::Fixed64 => skip_bytes(data, index, 8),
        WireType::Fixed32 => skip_bytes(data, index, 4),
        WireType::LengthDelimited => {
            let (len, start) = length_prefix(data, index)?;
            Ok(start + len)
        }
        WireType::StartGroup | WireType::EndGroup => Ok(index),
    }
}

fn skip_bytes(data: &[u8], index: usize, count: usize) -> Result<usize> {
    match index.checked_add(count) {
        Some(end) if end <= data.len() => Ok(end),
        _ => Err(Error::UnexpectedEof),
    }
}

/// Estimate the number of elements in a packed run.
///
/// Fixed-width runs divide by the element width; varint runs count the bytes
/// that terminate a varint. The result is only a capacity hint.
pub fn packed_count(wire_type: WireType, payload: &[u8]) -> Result<usize> {
    match wire_type {
        WireType::Fixed32 => Ok(payload.len() / 4),
        WireType::Fixed64 => Ok(payload.len() / 8),
        WireType::Varint => Ok(payload.iter().filter(|&&b| b < 0x80).count()),
        other => Err(Error::InvalidWireType {
            value: other.as_u8(),
        }),
    }
}

#[cfg(test)]
pub(crate) fn encode_varint(mut value: u64) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(MAX_VARINT64_LEN);
    while value >= 0x80 {
        bytes.push((value as u8 & 0x7F) | 0x80);
        value >>= 7;
    }
    bytes.push(value as u8);
    bytes
}
