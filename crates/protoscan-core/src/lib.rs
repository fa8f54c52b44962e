//! # protoscan-core
//!
//! A zero-copy scanner for the Protocol Buffers wire format.
//!
//! Instead of decoding a message into an object graph, a [`Cursor`] walks
//! the encoded bytes one tagged value at a time. The caller picks the fields
//! it cares about, decodes them in place, and skips the rest. Strings, bytes
//! and embedded messages are borrowed from the input buffer, never copied.
//!
//! ## Architecture
//!
//! - [`decode`]: primitive decoders (varint, zig-zag, fixed-width, length prefix)
//! - [`scalar`]: the protobuf scalar types as marker types, and [`ScalarRead`]
//! - [`cursor`]: tag scanning, skipping, repeated fields, sub-messages, groups
//! - [`packed`]: bounded iteration over a packed repeated field
//! - [`wire`]: wire types and tags
//! - [`error`]: error types and handling
//!
//! ## Example
//!
//! ```
//! use protoscan_core::scalar::Int64;
//! use protoscan_core::{Cursor, ScalarRead};
//!
//! // field 1 = int64 123, field 2 = packed int64 [1, 2, 3], field 32 = true
//! let data = [0x08, 0x7B, 0x12, 0x03, 0x01, 0x02, 0x03, 0x80, 0x02, 0x01];
//!
//! let mut msg = Cursor::new(&data);
//! let mut numbers = Vec::new();
//! let mut after = false;
//! while msg.advance() {
//!     match msg.field_number() {
//!         2 => msg.read_repeated::<Int64>(&mut numbers)?,
//!         32 => after = msg.bool()?,
//!         _ => msg.skip()?,
//!     }
//! }
//!
//! if let Some(err) = msg.error() {
//!     return Err(err);
//! }
//! assert_eq!(numbers, [1, 2, 3]);
//! assert!(after);
//! # Ok::<(), protoscan_core::Error>(())
//! ```
//!
//! The scanner is schema-agnostic: which accessor to call for a field number
//! is up to the caller.

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

pub mod cursor;
pub mod decode;
pub mod error;
pub mod packed;
pub mod scalar;
pub mod wire;

#[cfg(test)]
mod testmsg;

// Re-export primary types for convenience
pub use cursor::Cursor;
pub use error::{Error, Result};
pub use packed::{PackedIter, Values};
pub use scalar::{Scalar, ScalarRead};
pub use wire::WireType;

/// Crate version for programmatic access
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum valid protobuf field number (2^29 - 1)
pub const MAX_FIELD_NUMBER: u32 = 536_870_911;
