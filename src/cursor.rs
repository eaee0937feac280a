//! Sequential byte sources for the deserializer
//!
//! A [`Cursor`] exposes one byte of lookahead and nothing else, which is all
//! the decoder needs. End of input is explicit: `current()` returns `None`
//! and every decode step that wanted a byte fails with
//! [`Error::TruncatedInput`].
//!
//! [`SliceCursor`] additionally implements [`BorrowCursor`], which lets the
//! in-place string sink hand out spans of the input buffer instead of copies.

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::{Error, Result};

/// Sequential read-only view over an input source
pub trait Cursor {
    /// Next unconsumed byte without advancing, `None` at end of input
    fn current(&mut self) -> Option<u8>;

    /// Move past the current byte
    fn advance(&mut self);

    /// Read one byte and advance
    #[inline]
    fn read_u8(&mut self) -> Result<u8> {
        let byte = self.current().ok_or(Error::TruncatedInput)?;
        self.advance();
        Ok(byte)
    }

    /// Append exactly `len` bytes to `out`
    ///
    /// `out` may hold a partial payload when this fails.
    fn read_into(&mut self, out: &mut Vec<u8>, len: usize) -> Result<()> {
        for _ in 0..len {
            out.push(self.read_u8()?);
        }
        Ok(())
    }

    /// Append exactly `len` bytes of UTF-8 text to `out`
    ///
    /// Decodes one character at a time so nothing is staged outside `out`.
    /// On failure `out` is restored to its previous length.
    fn read_str_into(&mut self, out: &mut String, len: usize) -> Result<()> {
        let start = out.len();
        let result = read_chars(self, out, len);
        if result.is_err() {
            out.truncate(start);
        }
        result
    }
}

fn read_chars<C: Cursor + ?Sized>(cursor: &mut C, out: &mut String, len: usize) -> Result<()> {
    let mut left = len;
    let mut buf = [0u8; 4];
    while left > 0 {
        let lead = cursor.read_u8()?;
        let width = utf8_width(lead);
        if width == 0 || width > left {
            return Err(Error::InvalidUtf8);
        }
        buf[0] = lead;
        for byte in &mut buf[1..width] {
            *byte = cursor.read_u8()?;
        }
        let ch = core::str::from_utf8(&buf[..width]).map_err(|_| Error::InvalidUtf8)?;
        out.push_str(ch);
        left -= width;
    }
    Ok(())
}

/// Encoded length announced by a UTF-8 lead byte, 0 if it cannot start a character
#[inline]
const fn utf8_width(lead: u8) -> usize {
    match lead {
        0x00..=0x7f => 1,
        0xc2..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf4 => 4,
        _ => 0,
    }
}

/// Cursor able to lend spans of its underlying buffer for `'de`
pub trait BorrowCursor<'de>: Cursor {
    /// Consume the next `len` bytes and return them without copying
    fn take(&mut self, len: usize) -> Result<&'de [u8]>;
}

/// Cursor over a contiguous byte slice with position tracking
#[derive(Debug, Clone)]
pub struct SliceCursor<'de> {
    /// Buffer being decoded
    pub buf: &'de [u8],
    /// Current read position
    pub pos: usize,
}

impl<'de> SliceCursor<'de> {
    /// Create a cursor positioned at the start of `buf`
    #[inline]
    pub fn new(buf: &'de [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current read position
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Get remaining bytes in cursor
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    /// Check if cursor is at end
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.buf.len()
    }

    /// Skip bytes in the cursor
    #[inline]
    pub fn skip(&mut self, n: usize) -> Result<()> {
        if n > self.remaining() {
            return Err(Error::TruncatedInput);
        }
        self.pos += n;
        Ok(())
    }

    /// Peek at bytes without advancing cursor
    #[inline]
    pub fn peek_bytes(&self, len: usize) -> Result<&'de [u8]> {
        self.buf
            .get(self.pos..)
            .and_then(|rest| rest.get(..len))
            .ok_or(Error::TruncatedInput)
    }
}

impl Cursor for SliceCursor<'_> {
    #[inline]
    fn current(&mut self) -> Option<u8> {
        self.buf.get(self.pos).copied()
    }

    #[inline]
    fn advance(&mut self) {
        if self.pos < self.buf.len() {
            self.pos += 1;
        }
    }

    #[inline]
    fn read_into(&mut self, out: &mut Vec<u8>, len: usize) -> Result<()> {
        let bytes = self.take(len)?;
        out.extend_from_slice(bytes);
        Ok(())
    }

    fn read_str_into(&mut self, out: &mut String, len: usize) -> Result<()> {
        let bytes = self.peek_bytes(len)?;
        let s = core::str::from_utf8(bytes).map_err(|_| Error::InvalidUtf8)?;
        out.push_str(s);
        self.pos += len;
        Ok(())
    }
}

impl<'de> BorrowCursor<'de> for SliceCursor<'de> {
    #[inline]
    fn take(&mut self, len: usize) -> Result<&'de [u8]> {
        let bytes = self.peek_bytes(len)?;
        self.pos += len;
        Ok(bytes)
    }
}

/// Cursor over a blocking [`std::io::Read`] source
///
/// Keeps one byte of lookahead. A read error other than `Interrupted` ends
/// the input; the error is kept and can be inspected with
/// [`ReaderCursor::io_error`] after a decode fails with `TruncatedInput`.
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct ReaderCursor<R> {
    reader: R,
    peeked: Option<u8>,
    exhausted: bool,
    consumed: u64,
    error: Option<std::io::Error>,
}

#[cfg(feature = "std")]
impl<R: std::io::Read> ReaderCursor<R> {
    /// Wrap a reader
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            peeked: None,
            exhausted: false,
            consumed: 0,
            error: None,
        }
    }

    /// Number of bytes consumed so far
    #[inline]
    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    /// I/O error that ended the input, if any
    #[inline]
    pub fn io_error(&self) -> Option<&std::io::Error> {
        self.error.as_ref()
    }

    /// Unwrap the reader; a byte already peeked is lost
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn fill(&mut self) {
        if self.peeked.is_some() || self.exhausted {
            return;
        }
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => {
                    self.exhausted = true;
                    return;
                }
                Ok(_) => {
                    self.peeked = Some(byte[0]);
                    return;
                }
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.error = Some(e);
                    self.exhausted = true;
                    return;
                }
            }
        }
    }
}

#[cfg(feature = "std")]
impl<R: std::io::Read> Cursor for ReaderCursor<R> {
    #[inline]
    fn current(&mut self) -> Option<u8> {
        self.fill();
        self.peeked
    }

    #[inline]
    fn advance(&mut self) {
        self.fill();
        if self.peeked.take().is_some() {
            self.consumed += 1;
        }
    }

    fn read_into(&mut self, out: &mut Vec<u8>, len: usize) -> Result<()> {
        use std::io::Read;

        let mut needed = len;
        if needed > 0 {
            if let Some(byte) = self.peeked.take() {
                out.push(byte);
                self.consumed += 1;
                needed -= 1;
            }
        }
        if needed == 0 {
            return Ok(());
        }
        if self.exhausted {
            return Err(Error::TruncatedInput);
        }

        // Grows with the data actually read, never with the declared length.
        let before = out.len();
        let read = (&mut self.reader).take(needed as u64).read_to_end(out);
        let got = out.len() - before;
        self.consumed += got as u64;
        if let Err(e) = read {
            self.error = Some(e);
            self.exhausted = true;
            return Err(Error::TruncatedInput);
        }
        if got < needed {
            self.exhausted = true;
            return Err(Error::TruncatedInput);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    /// Cursor implementing only the required methods
    struct ByteByByte<'a> {
        data: &'a [u8],
        pos: usize,
    }

    impl Cursor for ByteByByte<'_> {
        fn current(&mut self) -> Option<u8> {
            self.data.get(self.pos).copied()
        }

        fn advance(&mut self) {
            if self.pos < self.data.len() {
                self.pos += 1;
            }
        }
    }

    #[test]
    fn test_slice_cursor_operations() {
        let data = [1, 2, 3, 4, 5, 6, 7, 8];
        let mut cursor = SliceCursor::new(&data);

        assert_eq!(cursor.remaining(), 8);
        assert!(!cursor.is_at_end());

        assert_eq!(cursor.current(), Some(1));
        assert_eq!(cursor.current(), Some(1)); // peek doesn't advance
        cursor.advance();
        assert_eq!(cursor.read_u8().unwrap(), 2);
        assert_eq!(cursor.position(), 2);

        cursor.skip(2).unwrap();
        assert_eq!(cursor.remaining(), 4);

        let peeked = cursor.peek_bytes(2).unwrap();
        assert_eq!(peeked, &[5, 6]);
        assert_eq!(cursor.remaining(), 4);

        assert_eq!(cursor.take(4).unwrap(), &[5, 6, 7, 8]);
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_slice_cursor_end_of_input() {
        let data = [0xaa];
        let mut cursor = SliceCursor::new(&data);

        cursor.advance();
        assert_eq!(cursor.current(), None);
        assert_eq!(cursor.read_u8(), Err(Error::TruncatedInput));
        cursor.advance(); // no-op past the end
        assert_eq!(cursor.position(), 1);
        assert_eq!(cursor.take(1), Err(Error::TruncatedInput));
        assert_eq!(cursor.skip(1), Err(Error::TruncatedInput));
        assert_eq!(cursor.peek_bytes(1), Err(Error::TruncatedInput));
    }

    #[test]
    fn test_take_borrows_input() {
        let data = [b'h', b'i', b'!'];
        let mut cursor = SliceCursor::new(&data);
        let span = cursor.take(2).unwrap();
        assert_eq!(span.as_ptr(), data.as_ptr());
        assert_eq!(cursor.remaining(), 1);
    }

    #[test]
    fn test_read_into_appends() {
        let data = [1, 2, 3];
        let mut cursor = SliceCursor::new(&data);
        let mut out = vec![9];
        cursor.read_into(&mut out, 2).unwrap();
        assert_eq!(out, vec![9, 1, 2]);
        assert_eq!(cursor.read_into(&mut out, 2), Err(Error::TruncatedInput));
        assert_eq!(cursor.position(), 2);
    }

    #[test]
    fn test_slice_cursor_out_of_range_position() {
        let data = [1, 2, 3];
        let mut cursor = SliceCursor { buf: &data, pos: 7 };
        assert_eq!(cursor.remaining(), 0);
        assert!(cursor.is_at_end());
        assert_eq!(cursor.current(), None);
        assert_eq!(cursor.peek_bytes(0), Err(Error::TruncatedInput));
        assert_eq!(cursor.take(1), Err(Error::TruncatedInput));

        let mut cursor = SliceCursor { buf: &data, pos: 1 };
        assert_eq!(cursor.peek_bytes(usize::MAX), Err(Error::TruncatedInput));
        assert_eq!(cursor.peek_bytes(2).unwrap(), &[2, 3]);
    }

    #[test]
    fn test_read_str_into_decodes_characters() {
        let text = "a\u{f1}\u{20ac}\u{1f600}";
        let mut out = String::from(">");

        let mut cursor = ByteByByte { data: text.as_bytes(), pos: 0 };
        cursor.read_str_into(&mut out, text.len()).unwrap();
        assert_eq!(out, ">a\u{f1}\u{20ac}\u{1f600}");

        let mut cursor = SliceCursor::new(text.as_bytes());
        cursor.read_str_into(&mut out, 3).unwrap();
        assert_eq!(out, ">a\u{f1}\u{20ac}\u{1f600}a\u{f1}");
        assert_eq!(cursor.position(), 3);
    }

    #[test]
    fn test_read_str_into_restores_on_failure() {
        let cases: [(&[u8], usize, Error); 4] = [
            (&[b'a', 0xff], 2, Error::InvalidUtf8),
            // declared length ends inside a character
            (&[0xe2, 0x82, 0xac], 2, Error::InvalidUtf8),
            // encoded surrogate
            (&[0xed, 0xa0, 0x80], 3, Error::InvalidUtf8),
            (&[b'a', 0xe2, 0x82], 4, Error::TruncatedInput),
        ];
        for (data, len, expected) in cases {
            let mut out = String::from("x");
            let mut cursor = ByteByByte { data, pos: 0 };
            assert_eq!(cursor.read_str_into(&mut out, len), Err(expected), "{data:02x?}");
            assert_eq!(out, "x");

            let mut cursor = SliceCursor::new(data);
            assert_eq!(cursor.read_str_into(&mut out, len), Err(expected), "{data:02x?}");
            assert_eq!(out, "x");
            assert_eq!(cursor.position(), 0);
        }
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_reader_cursor() {
        let data: &[u8] = &[0x10, 0x20, 0x30, 0x40];
        let mut cursor = ReaderCursor::new(data);

        assert_eq!(cursor.current(), Some(0x10));
        assert_eq!(cursor.consumed(), 0);
        assert_eq!(cursor.read_u8().unwrap(), 0x10);

        let mut out = vec![];
        cursor.read_into(&mut out, 2).unwrap();
        assert_eq!(out, vec![0x20, 0x30]);
        assert_eq!(cursor.consumed(), 3);

        assert_eq!(cursor.read_into(&mut out, 3), Err(Error::TruncatedInput));
        assert_eq!(cursor.current(), None);
        assert!(cursor.io_error().is_none());
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_reader_cursor_keeps_io_error() {
        struct Broken;
        impl std::io::Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "boom"))
            }
        }

        let mut cursor = ReaderCursor::new(Broken);
        assert_eq!(cursor.read_u8(), Err(Error::TruncatedInput));
        assert_eq!(
            cursor.io_error().map(|e| e.kind()),
            Some(std::io::ErrorKind::Other)
        );
    }

    /// Reader that fails with `Interrupted` before every successful read
    #[cfg(feature = "std")]
    struct Flaky {
        data: &'static [u8],
        interrupt: bool,
    }

    #[cfg(feature = "std")]
    impl std::io::Read for Flaky {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            self.interrupt = !self.interrupt;
            if self.interrupt {
                return Err(std::io::ErrorKind::Interrupted.into());
            }
            std::io::Read::read(&mut self.data, buf)
        }
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_reader_cursor_retries_interrupted() {
        let mut cursor = ReaderCursor::new(Flaky {
            data: b"*bcd\xc3\xa9!",
            interrupt: false,
        });

        assert_eq!(cursor.read_u8(), Ok(b'*'));
        let mut out = vec![];
        cursor.read_into(&mut out, 3).unwrap();
        assert_eq!(out, b"bcd");
        let mut text = String::new();
        cursor.read_str_into(&mut text, 2).unwrap();
        assert_eq!(text, "\u{e9}");
        assert_eq!(cursor.read_u8(), Ok(b'!'));

        assert_eq!(cursor.read_u8(), Err(Error::TruncatedInput));
        assert!(cursor.io_error().is_none());
        assert_eq!(cursor.consumed(), 7);
    }
}
