//! packtree: MessagePack decoding into an arena-backed value tree
//!
//! This crate reads one MessagePack value from a byte source and rebuilds it
//! as a tree of [`Variant`] nodes whose containers and copied payloads live in
//! a caller-supplied [`Arena`].
//!
//! # Features
//!
//! - Explicit nesting limit, checked before any container element is read
//! - Byte-budgeted arena storage that fails cleanly with `OutOfMemory`
//! - Zero-copy strings and binaries when decoding from a slice
//! - Streaming decode from any `std::io::Read` with the `std` feature
//! - Platform emulation: 64-bit integer truncation and double narrowing
//! - `no_std` support with `alloc`
//!
//! # Example
//!
//! ```rust
//! use packtree::{deserialize_in_place, Arena, Variant};
//!
//! // {"name": "sensor", "values": [1, -2, 2.5]}
//! let input = [
//!     0x82, 0xa4, b'n', b'a', b'm', b'e', 0xa6, b's', b'e', b'n', b's', b'o', b'r',
//!     0xa6, b'v', b'a', b'l', b'u', b'e', b's', 0x93, 0x01, 0xfe, 0xca, 0x40, 0x20, 0x00, 0x00,
//! ];
//!
//! let mut arena = Arena::new();
//! let root = deserialize_in_place(&input, &mut arena)?;
//!
//! let map = root.as_map().unwrap();
//! let name = arena.get(map, "name").and_then(Variant::as_str_ref).unwrap();
//! assert_eq!(arena.text(name), "sensor");
//!
//! let values = arena.get(map, "values").and_then(Variant::as_array).unwrap();
//! let decoded: Vec<_> = arena.elements(values).filter_map(Variant::as_f64).collect();
//! assert_eq!(decoded, [1.0, -2.0, 2.5]);
//! # Ok::<(), packtree::Error>(())
//! ```

#![no_std]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

pub mod arena;
pub mod config;
pub mod cursor;
pub mod deserializer;
pub mod error;
pub mod ieee754;
pub mod numeric;
pub mod sink;
pub mod tags;
pub mod variant;

// Re-export main types
pub use arena::{Arena, Elements, Entries};
pub use config::Config;
#[cfg(feature = "std")]
pub use cursor::ReaderCursor;
pub use cursor::{BorrowCursor, Cursor, SliceCursor};
pub use deserializer::Deserializer;
pub use error::{Error, Result};
pub use sink::{Copying, InPlace, StringSink};
pub use variant::{ArrayRef, BinRef, Kind, MapRef, StrRef, Variant};

/// Container depth accepted when no other limit is configured
pub const DEFAULT_NESTING_LIMIT: u8 = 10;

/// Decode one value from `input`, copying strings and binaries into `arena`
pub fn deserialize<'de>(input: &[u8], arena: &mut Arena<'de>) -> Result<Variant<'de>> {
    deserialize_with(
        &mut SliceCursor::new(input),
        arena,
        Copying::new(),
        Config::default(),
    )
}

/// Decode one value from `input`, borrowing strings and binaries from it
///
/// `input` stays borrowed for as long as `arena` is in use.
pub fn deserialize_in_place<'de>(input: &'de [u8], arena: &mut Arena<'de>) -> Result<Variant<'de>> {
    deserialize_with(
        &mut SliceCursor::new(input),
        arena,
        InPlace,
        Config::default(),
    )
}

/// Decode one value with an explicit cursor, sink and configuration
pub fn deserialize_with<'de, C, S>(
    cursor: &mut C,
    arena: &mut Arena<'de>,
    sink: S,
    config: Config,
) -> Result<Variant<'de>>
where
    C: Cursor + ?Sized,
    S: StringSink<'de, C>,
{
    Deserializer::new(cursor, arena, sink, config).decode_value()
}

/// Decode one value from a blocking reader, copying payloads into `arena`
///
/// At most the bytes of that one value are consumed, plus one byte of
/// lookahead in the worst case.
#[cfg(feature = "std")]
pub fn from_reader<'de, R: std::io::Read>(reader: R, arena: &mut Arena<'de>) -> Result<Variant<'de>> {
    let mut cursor = ReaderCursor::new(reader);
    deserialize_with(&mut cursor, arena, Copying::new(), Config::default())
}
