//! MessagePack deserializer core
//!
//! Reads one tag byte, dispatches on it and rebuilds the value it announces.
//! Containers recurse with an explicit depth budget: each array or map entered
//! consumes one unit, and entering a container with no budget left fails with
//! [`Error::NestingTooDeep`] before any of its elements are read.
//!
//! Failures abort the whole decode. Arena storage already consumed by a
//! partially built tree stays allocated until the arena is reset.

use crate::arena::{Arena, ListBuilder};
use crate::config::Config;
use crate::cursor::Cursor;
use crate::error::{Error, Result};
use crate::numeric::{
    read_f32, read_f64, read_f64_narrowed, read_i16, read_i32, read_i64, read_i64_truncated,
    read_i8, read_len, read_u16, read_u32, read_u64, read_u64_truncated, read_u8,
};
use crate::sink::StringSink;
use crate::tags::{self, ContainerKind};
use crate::variant::{ArrayRef, MapRef, StrRef, Variant};

/// Decoder over a cursor, writing into an arena through a string sink
pub struct Deserializer<'a, 'de, C: ?Sized, S> {
    cursor: &'a mut C,
    arena: &'a mut Arena<'de>,
    sink: S,
    config: Config,
}

impl<'a, 'de, C, S> Deserializer<'a, 'de, C, S>
where
    C: Cursor + ?Sized,
    S: StringSink<'de, C>,
{
    /// Create a deserializer; the nesting limit comes from `config`
    pub fn new(cursor: &'a mut C, arena: &'a mut Arena<'de>, sink: S, config: Config) -> Self {
        Self {
            cursor,
            arena,
            sink,
            config,
        }
    }

    /// Active configuration
    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Decode one value of any type
    pub fn decode_value(&mut self) -> Result<Variant<'de>> {
        self.value(self.config.nesting_limit)
    }

    /// Decode one value into `target`, which is left untouched on failure
    pub fn decode_into(&mut self, target: &mut Variant<'de>) -> Result<()> {
        *target = self.decode_value()?;
        Ok(())
    }

    /// Decode one value that must be an array
    ///
    /// Fails with [`Error::TypeMismatch`] if the tag announces anything else;
    /// the tag byte stays consumed.
    pub fn parse_as_array(&mut self) -> Result<ArrayRef> {
        let tag = self.cursor.read_u8()?;
        if ContainerKind::of(tag) != Some(ContainerKind::Array) {
            return Err(Error::TypeMismatch);
        }
        let len = self.container_len(tag)?;
        self.array(len, self.config.nesting_limit)
    }

    /// Decode one value that must be a map
    ///
    /// Fails with [`Error::TypeMismatch`] if the tag announces anything else;
    /// the tag byte stays consumed.
    pub fn parse_as_map(&mut self) -> Result<MapRef> {
        let tag = self.cursor.read_u8()?;
        if ContainerKind::of(tag) != Some(ContainerKind::Map) {
            return Err(Error::TypeMismatch);
        }
        let len = self.container_len(tag)?;
        self.map(len, self.config.nesting_limit)
    }

    fn value(&mut self, depth: u8) -> Result<Variant<'de>> {
        let tag = self.cursor.read_u8()?;

        if tags::is_positive_fixint(tag) {
            return Ok(Variant::UInt(u64::from(tag)));
        }
        if tags::is_negative_fixint(tag) {
            return Ok(Variant::Int(i64::from(tag as i8)));
        }

        let value = match tag {
            tags::FIXMAP..=tags::FIXMAP_END => Variant::Map(self.map(tags::fix_container_len(tag), depth)?),
            tags::FIXARRAY..=tags::FIXARRAY_END => Variant::Array(self.array(tags::fix_container_len(tag), depth)?),
            tags::FIXSTR..=tags::FIXSTR_END => Variant::Str(self.string(tags::fixstr_len(tag))?),

            tags::NIL => Variant::Null,
            tags::FALSE => Variant::Bool(false),
            tags::TRUE => Variant::Bool(true),

            tags::BIN8 | tags::BIN16 | tags::BIN32 => {
                let len = read_len(self.cursor, prefix_size(tag))?;
                Variant::Bin(self.sink.store_bin(self.cursor, len, self.arena)?)
            }

            tags::FLOAT32 => Variant::Float32(read_f32(self.cursor)?),
            tags::FLOAT64 if self.config.use_double => Variant::Float64(read_f64(self.cursor)?),
            tags::FLOAT64 => Variant::Float32(read_f64_narrowed(self.cursor)?),

            tags::UINT8 => Variant::UInt(u64::from(read_u8(self.cursor)?)),
            tags::UINT16 => Variant::UInt(u64::from(read_u16(self.cursor)?)),
            tags::UINT32 => Variant::UInt(u64::from(read_u32(self.cursor)?)),
            tags::UINT64 if self.config.use_int64 => Variant::UInt(read_u64(self.cursor)?),
            tags::UINT64 => Variant::UInt(u64::from(read_u64_truncated(self.cursor)?)),

            tags::INT8 => Variant::Int(i64::from(read_i8(self.cursor)?)),
            tags::INT16 => Variant::Int(i64::from(read_i16(self.cursor)?)),
            tags::INT32 => Variant::Int(i64::from(read_i32(self.cursor)?)),
            tags::INT64 if self.config.use_int64 => Variant::Int(read_i64(self.cursor)?),
            tags::INT64 => Variant::Int(i64::from(read_i64_truncated(self.cursor)?)),

            tags::STR8 | tags::STR16 | tags::STR32 => {
                let len = read_len(self.cursor, prefix_size(tag))?;
                Variant::Str(self.string(len)?)
            }

            tags::ARRAY16 | tags::ARRAY32 => {
                let len = read_len(self.cursor, prefix_size(tag))?;
                Variant::Array(self.array(len, depth)?)
            }
            tags::MAP16 | tags::MAP32 => {
                let len = read_len(self.cursor, prefix_size(tag))?;
                Variant::Map(self.map(len, depth)?)
            }

            // never-used tag and the extension family
            _ => return Err(Error::Format(tag)),
        };
        Ok(value)
    }

    fn array(&mut self, len: usize, depth: u8) -> Result<ArrayRef> {
        let depth = depth.checked_sub(1).ok_or(Error::NestingTooDeep)?;
        let mut list = ListBuilder::default();
        for _ in 0..len {
            let value = self.value(depth)?;
            list.push(self.arena, None, value)?;
        }
        Ok(list.into_array())
    }

    fn map(&mut self, len: usize, depth: u8) -> Result<MapRef> {
        let depth = depth.checked_sub(1).ok_or(Error::NestingTooDeep)?;
        let mut list = ListBuilder::default();
        for _ in 0..len {
            let key = self.key()?;
            let value = self.value(depth)?;
            list.push(self.arena, Some(key), value)?;
        }
        Ok(list.into_map())
    }

    fn key(&mut self) -> Result<StrRef<'de>> {
        let tag = self.cursor.read_u8()?;
        let len = match tag {
            tags::FIXSTR..=tags::FIXSTR_END => tags::fixstr_len(tag),
            tags::STR8 | tags::STR16 | tags::STR32 => read_len(self.cursor, prefix_size(tag))?,
            _ => return Err(Error::NonStringKey),
        };
        self.string(len)
    }

    #[inline]
    fn string(&mut self, len: usize) -> Result<StrRef<'de>> {
        self.sink.store_str(self.cursor, len, self.arena)
    }

    fn container_len(&mut self, tag: u8) -> Result<usize> {
        match tag {
            tags::FIXMAP..=tags::FIXARRAY_END => Ok(tags::fix_container_len(tag)),
            _ => read_len(self.cursor, prefix_size(tag)),
        }
    }
}

/// Width of the length prefix following a str/bin/array/map tag
#[inline]
const fn prefix_size(tag: u8) -> usize {
    match tag {
        tags::STR8 | tags::BIN8 => 1,
        tags::STR16 | tags::BIN16 | tags::ARRAY16 | tags::MAP16 => 2,
        _ => 4,
    }
}
