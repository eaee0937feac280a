//! MessagePack wire tags
//!
//! Single-byte markers that open every encoded value. Fixed-size families
//! (fixint, fixstr, fixarray, fixmap) carry their payload or length in the
//! low bits of the tag itself.

/// nil
pub const NIL: u8 = 0xc0;
/// Never used by the format
pub const NEVER_USED: u8 = 0xc1;
/// false
pub const FALSE: u8 = 0xc2;
/// true
pub const TRUE: u8 = 0xc3;

/// bin 8
pub const BIN8: u8 = 0xc4;
/// bin 16
pub const BIN16: u8 = 0xc5;
/// bin 32
pub const BIN32: u8 = 0xc6;

/// float 32
pub const FLOAT32: u8 = 0xca;
/// float 64
pub const FLOAT64: u8 = 0xcb;

/// uint 8
pub const UINT8: u8 = 0xcc;
/// uint 16
pub const UINT16: u8 = 0xcd;
/// uint 32
pub const UINT32: u8 = 0xce;
/// uint 64
pub const UINT64: u8 = 0xcf;
/// int 8
pub const INT8: u8 = 0xd0;
/// int 16
pub const INT16: u8 = 0xd1;
/// int 32
pub const INT32: u8 = 0xd2;
/// int 64
pub const INT64: u8 = 0xd3;

/// str 8
pub const STR8: u8 = 0xd9;
/// str 16
pub const STR16: u8 = 0xda;
/// str 32
pub const STR32: u8 = 0xdb;
/// array 16
pub const ARRAY16: u8 = 0xdc;
/// array 32
pub const ARRAY32: u8 = 0xdd;
/// map 16
pub const MAP16: u8 = 0xde;
/// map 32
pub const MAP32: u8 = 0xdf;

/// First fixmap tag
pub const FIXMAP: u8 = 0x80;
/// Last fixmap tag
pub const FIXMAP_END: u8 = 0x8f;
/// First fixarray tag
pub const FIXARRAY: u8 = 0x90;
/// Last fixarray tag
pub const FIXARRAY_END: u8 = 0x9f;
/// First fixstr tag
pub const FIXSTR: u8 = 0xa0;
/// Last fixstr tag
pub const FIXSTR_END: u8 = 0xbf;

/// Positive fixint: high bit clear
#[inline]
pub const fn is_positive_fixint(tag: u8) -> bool {
    tag & 0x80 == 0
}

/// Negative fixint: top three bits set
#[inline]
pub const fn is_negative_fixint(tag: u8) -> bool {
    tag & 0xe0 == 0xe0
}

/// Element count carried by a fixmap or fixarray tag
#[inline]
pub const fn fix_container_len(tag: u8) -> usize {
    (tag & 0x0f) as usize
}

/// Byte length carried by a fixstr tag
#[inline]
pub const fn fixstr_len(tag: u8) -> usize {
    (tag & 0x1f) as usize
}

/// Container shape announced by a tag, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    /// fixarray, array 16, array 32
    Array,
    /// fixmap, map 16, map 32
    Map,
}

impl ContainerKind {
    /// Classify a tag byte
    #[inline]
    pub const fn of(tag: u8) -> Option<Self> {
        match tag {
            FIXARRAY..=FIXARRAY_END | ARRAY16 | ARRAY32 => Some(Self::Array),
            FIXMAP..=FIXMAP_END | MAP16 | MAP32 => Some(Self::Map),
            _ => None,
        }
    }
}
