//! String storage strategies
//!
//! The deserializer hands every string and binary payload to a
//! [`StringSink`]. [`Copying`] copies the bytes into the arena and works with
//! any cursor. [`InPlace`] borrows the bytes straight out of the input buffer;
//! it is only implemented for cursors that can lend such spans, so pairing it
//! with a streaming cursor does not compile.

use crate::arena::Arena;
use crate::cursor::{BorrowCursor, Cursor};
use crate::error::{Error, Result};
use crate::variant::{BinRef, StrRef};

/// Decides where decoded payload bytes are stored
pub trait StringSink<'de, C: ?Sized> {
    /// Consume a `len`-byte UTF-8 payload from `cursor`
    fn store_str(&mut self, cursor: &mut C, len: usize, arena: &mut Arena<'de>)
        -> Result<StrRef<'de>>;

    /// Consume a `len`-byte binary payload from `cursor`
    fn store_bin(&mut self, cursor: &mut C, len: usize, arena: &mut Arena<'de>)
        -> Result<BinRef<'de>>;
}

/// Copy payloads into arena storage
///
/// Bytes go from the cursor straight into the arena buffers; nothing is
/// staged in between.
#[derive(Debug, Default, Clone, Copy)]
pub struct Copying;

impl Copying {
    /// New copying sink
    #[inline]
    pub const fn new() -> Self {
        Self
    }
}

impl<'de, C: Cursor + ?Sized> StringSink<'de, C> for Copying {
    fn store_str(&mut self, cursor: &mut C, len: usize, arena: &mut Arena<'de>) -> Result<StrRef<'de>> {
        arena.read_str(cursor, len)
    }

    fn store_bin(&mut self, cursor: &mut C, len: usize, arena: &mut Arena<'de>) -> Result<BinRef<'de>> {
        arena.read_bytes(cursor, len)
    }
}

/// Borrow payloads from the input buffer without copying
///
/// The input buffer stays borrowed for as long as the arena holds the
/// resulting handles.
#[derive(Debug, Default, Clone, Copy)]
pub struct InPlace;

impl<'de, C: BorrowCursor<'de> + ?Sized> StringSink<'de, C> for InPlace {
    fn store_str(&mut self, cursor: &mut C, len: usize, _arena: &mut Arena<'de>) -> Result<StrRef<'de>> {
        let bytes = cursor.take(len)?;
        let s = core::str::from_utf8(bytes).map_err(|_| Error::InvalidUtf8)?;
        Ok(StrRef::Borrowed(s))
    }

    fn store_bin(&mut self, cursor: &mut C, len: usize, _arena: &mut Arena<'de>) -> Result<BinRef<'de>> {
        Ok(BinRef::Borrowed(cursor.take(len)?))
    }
}
