//! Scalar kinds and the reader trait built on them.
//!
//! Protobuf has thirteen scalar types that map onto only three wire
//! encodings. Each type is modelled as a zero-sized marker implementing
//! [`Scalar`], which pins down the decoded Rust type, the wire type of an
//! unpacked occurrence, and the decode routine. Generic code such as
//! [`Cursor::read_repeated`](crate::Cursor::read_repeated) is written once
//! against the trait.
//!
//! ```
//! use protoscan_core::scalar::Sint64;
//! use protoscan_core::{Cursor, ScalarRead};
//!
//! // Field 1, sint64 -2
//! let data = [0x08, 0x03];
//! let mut cursor = Cursor::new(&data);
//! assert!(cursor.advance());
//! assert_eq!(cursor.read::<Sint64>()?, -2);
//! # Ok::<(), protoscan_core::Error>(())
//! ```

use crate::decode;
use crate::error::Result;
use crate::wire::WireType;

/// A protobuf scalar type
pub trait Scalar {
    /// The Rust type a value decodes to
    type Value: Copy;

    /// Wire type of a single unpacked occurrence
    const WIRE_TYPE: WireType;

    /// The `.proto` name of the type
    const NAME: &'static str;

    /// Decode one value at `index`, returning it and the offset past it
    fn decode(data: &[u8], index: usize) -> Result<(Self::Value, usize)>;

    /// Estimate the number of values in a packed run of this type
    fn count(payload: &[u8]) -> usize {
        // Only Varint / Fixed32 / Fixed64 kinds exist, all of which count.
        decode::packed_count(Self::WIRE_TYPE, payload).unwrap_or(0)
    }
}

macro_rules! scalar {
    ($(#[$doc:meta])* $kind:ident => $value:ty, $wire:ident, $name:literal, $read:path, $map:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct $kind;

        impl Scalar for $kind {
            type Value = $value;
            const WIRE_TYPE: WireType = WireType::$wire;
            const NAME: &'static str = $name;

            #[inline]
            fn decode(data: &[u8], index: usize) -> Result<($value, usize)> {
                let (raw, index) = $read(data, index)?;
                Ok((($map)(raw), index))
            }
        }
    };
}

scalar! {
    /// `int32`: plain varint, negative values sign-extended to ten bytes
    Int32 => i32, Varint, "int32", decode::varint64, |v: u64| v as i32
}
scalar! {
    /// `int64`: plain varint in two's complement
    Int64 => i64, Varint, "int64", decode::varint64, |v: u64| v as i64
}
scalar! {
    /// `uint32`
    Uint32 => u32, Varint, "uint32", decode::varint32, |v: u32| v
}
scalar! {
    /// `uint64`
    Uint64 => u64, Varint, "uint64", decode::varint64, |v: u64| v
}
scalar! {
    /// `sint32`: zig-zag varint
    Sint32 => i32, Varint, "sint32", decode::varint32, decode::zigzag32
}
scalar! {
    /// `sint64`: zig-zag varint
    Sint64 => i64, Varint, "sint64", decode::varint64, decode::zigzag64
}
scalar! {
    /// `fixed32`
    Fixed32 => u32, Fixed32, "fixed32", decode::fixed32, |v: u32| v
}
scalar! {
    /// `fixed64`
    Fixed64 => u64, Fixed64, "fixed64", decode::fixed64, |v: u64| v
}
scalar! {
    /// `sfixed32`
    Sfixed32 => i32, Fixed32, "sfixed32", decode::fixed32, |v: u32| v as i32
}
scalar! {
    /// `sfixed64`
    Sfixed64 => i64, Fixed64, "sfixed64", decode::fixed64, |v: u64| v as i64
}
scalar! {
    /// `float`: IEEE-754 binary32
    Float => f32, Fixed32, "float", decode::fixed32, f32::from_bits
}
scalar! {
    /// `double`: IEEE-754 binary64
    Double => f64, Fixed64, "double", decode::fixed64, f64::from_bits
}
scalar! {
    /// `bool`: true only when the varint is exactly 1
    Bool => bool, Varint, "bool", decode::varint64, |v: u64| v == 1
}

/// Per-type accessors shared by every reader.
///
/// Implementors only provide [`read`](Self::read); each named accessor
/// decodes one value of that protobuf type at the reader's position.
pub trait ScalarRead {
    /// Decode one value of kind `K`
    fn read<K: Scalar>(&mut self) -> Result<K::Value>;

    /// Read an `int32` (also used for enums)
    fn int32(&mut self) -> Result<i32> {
        self.read::<Int32>()
    }

    /// Read an `int64`
    fn int64(&mut self) -> Result<i64> {
        self.read::<Int64>()
    }

    /// Read a `uint32`
    fn uint32(&mut self) -> Result<u32> {
        self.read::<Uint32>()
    }

    /// Read a `uint64`
    fn uint64(&mut self) -> Result<u64> {
        self.read::<Uint64>()
    }

    /// Read a zig-zag `sint32`
    fn sint32(&mut self) -> Result<i32> {
        self.read::<Sint32>()
    }

    /// Read a zig-zag `sint64`
    fn sint64(&mut self) -> Result<i64> {
        self.read::<Sint64>()
    }

    /// Read a `fixed32`
    fn fixed32(&mut self) -> Result<u32> {
        self.read::<Fixed32>()
    }

    /// Read a `fixed64`
    fn fixed64(&mut self) -> Result<u64> {
        self.read::<Fixed64>()
    }

    /// Read an `sfixed32`
    fn sfixed32(&mut self) -> Result<i32> {
        self.read::<Sfixed32>()
    }

    /// Read an `sfixed64`
    fn sfixed64(&mut self) -> Result<i64> {
        self.read::<Sfixed64>()
    }

    /// Read a `float`
    fn float(&mut self) -> Result<f32> {
        self.read::<Float>()
    }

    /// Read a `double`
    fn double(&mut self) -> Result<f64> {
        self.read::<Double>()
    }

    /// Read a `bool`
    fn bool(&mut self) -> Result<bool> {
        self.read::<Bool>()
    }
}
