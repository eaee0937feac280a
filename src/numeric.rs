//! Big-endian numeric readers
//!
//! MessagePack stores every multi-byte number in network byte order. Integers
//! are rebuilt one byte at a time as `value = (value << 8) | next`, then cast
//! to the concrete width and signedness the tag names.

use crate::cursor::Cursor;
use crate::error::{Error, Result};
use crate::ieee754;

/// Accumulate `size` big-endian bytes (at most 8)
#[inline]
pub fn read_be<C: Cursor + ?Sized>(cursor: &mut C, size: usize) -> Result<u64> {
    debug_assert!(size <= 8);
    let mut value = 0u64;
    for _ in 0..size {
        value = (value << 8) | u64::from(cursor.read_u8()?);
    }
    Ok(value)
}

/// Read exactly `N` raw bytes
#[inline]
pub fn read_array<C: Cursor + ?Sized, const N: usize>(cursor: &mut C) -> Result<[u8; N]> {
    let mut raw = [0u8; N];
    for byte in raw.iter_mut() {
        *byte = cursor.read_u8()?;
    }
    Ok(raw)
}

/// uint 8
#[inline]
pub fn read_u8<C: Cursor + ?Sized>(cursor: &mut C) -> Result<u8> {
    cursor.read_u8()
}

/// uint 16
#[inline]
pub fn read_u16<C: Cursor + ?Sized>(cursor: &mut C) -> Result<u16> {
    Ok(read_be(cursor, 2)? as u16)
}

/// uint 32
#[inline]
pub fn read_u32<C: Cursor + ?Sized>(cursor: &mut C) -> Result<u32> {
    Ok(read_be(cursor, 4)? as u32)
}

/// uint 64
#[inline]
pub fn read_u64<C: Cursor + ?Sized>(cursor: &mut C) -> Result<u64> {
    read_be(cursor, 8)
}

/// uint 64 on a target without 64-bit integers: the high 32 bits are dropped
#[inline]
pub fn read_u64_truncated<C: Cursor + ?Sized>(cursor: &mut C) -> Result<u32> {
    Ok(read_be(cursor, 8)? as u32)
}

/// int 8
#[inline]
pub fn read_i8<C: Cursor + ?Sized>(cursor: &mut C) -> Result<i8> {
    Ok(cursor.read_u8()? as i8)
}

/// int 16
#[inline]
pub fn read_i16<C: Cursor + ?Sized>(cursor: &mut C) -> Result<i16> {
    Ok(read_u16(cursor)? as i16)
}

/// int 32
#[inline]
pub fn read_i32<C: Cursor + ?Sized>(cursor: &mut C) -> Result<i32> {
    Ok(read_u32(cursor)? as i32)
}

/// int 64
#[inline]
pub fn read_i64<C: Cursor + ?Sized>(cursor: &mut C) -> Result<i64> {
    Ok(read_u64(cursor)? as i64)
}

/// int 64 on a target without 64-bit integers: the low 32 bits reinterpreted as `i32`
#[inline]
pub fn read_i64_truncated<C: Cursor + ?Sized>(cursor: &mut C) -> Result<i32> {
    Ok(read_u64_truncated(cursor)? as i32)
}

/// float 32
#[inline]
pub fn read_f32<C: Cursor + ?Sized>(cursor: &mut C) -> Result<f32> {
    Ok(f32::from_be_bytes(read_array(cursor)?))
}

/// float 64
#[inline]
pub fn read_f64<C: Cursor + ?Sized>(cursor: &mut C) -> Result<f64> {
    Ok(f64::from_be_bytes(read_array(cursor)?))
}

/// float 64 narrowed to single precision on the raw bits
#[inline]
pub fn read_f64_narrowed<C: Cursor + ?Sized>(cursor: &mut C) -> Result<f32> {
    let wide: [u8; 8] = read_array(cursor)?;
    Ok(f32::from_be_bytes(ieee754::double_to_float(wide)))
}

/// Length or count prefix of `size` bytes (1, 2 or 4)
#[inline]
pub fn read_len<C: Cursor + ?Sized>(cursor: &mut C, size: usize) -> Result<usize> {
    usize::try_from(read_be(cursor, size)?).map_err(|_| Error::OutOfMemory)
}
