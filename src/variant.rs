//! Decoded value type and arena handles
//!
//! A [`Variant`] is small and `Copy`. Scalars live inline; strings, blobs and
//! containers are handles that resolve against the [`Arena`](crate::Arena)
//! that produced them.

/// Byte range inside arena storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Offset of the first byte
    pub start: usize,
    /// Length in bytes
    pub len: usize,
}

impl Span {
    /// Range form for slicing
    #[inline]
    pub const fn range(&self) -> core::ops::Range<usize> {
        self.start..self.start.saturating_add(self.len)
    }
}

/// Index of a node slot in an arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

/// String payload: borrowed from the input buffer or copied into the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrRef<'de> {
    /// Span of the input buffer, valid for `'de`
    Borrowed(&'de str),
    /// Copy held in the arena's text storage
    Owned(Span),
}

impl StrRef<'_> {
    /// Payload length in bytes
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            StrRef::Borrowed(s) => s.len(),
            StrRef::Owned(span) => span.len,
        }
    }

    /// True for the empty string
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when the payload aliases the input buffer
    #[inline]
    pub fn is_borrowed(&self) -> bool {
        matches!(self, StrRef::Borrowed(_))
    }
}

/// Binary payload: borrowed from the input buffer or copied into the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinRef<'de> {
    /// Span of the input buffer, valid for `'de`
    Borrowed(&'de [u8]),
    /// Copy held in the arena's byte storage
    Owned(Span),
}

impl BinRef<'_> {
    /// Payload length in bytes
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            BinRef::Borrowed(b) => b.len(),
            BinRef::Owned(span) => span.len,
        }
    }

    /// True for an empty blob
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when the payload aliases the input buffer
    #[inline]
    pub fn is_borrowed(&self) -> bool {
        matches!(self, BinRef::Borrowed(_))
    }
}

/// Ordered sequence of values, linked through arena slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ArrayRef {
    pub(crate) head: Option<NodeId>,
    pub(crate) len: usize,
}

impl ArrayRef {
    /// Number of elements
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// True when the array has no elements
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Ordered sequence of (string key, value) entries, linked through arena slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MapRef {
    pub(crate) head: Option<NodeId>,
    pub(crate) len: usize,
}

impl MapRef {
    /// Number of entries, duplicates included
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// True when the map has no entries
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Discriminant of a [`Variant`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// nil
    Null,
    /// true/false
    Bool,
    /// Signed integer
    Int,
    /// Unsigned integer
    UInt,
    /// Single precision float
    Float32,
    /// Double precision float
    Float64,
    /// UTF-8 string
    Str,
    /// Binary blob
    Bin,
    /// Array
    Array,
    /// Map
    Map,
}

/// One decoded MessagePack value
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Variant<'de> {
    /// nil
    #[default]
    Null,
    /// true/false
    Bool(bool),
    /// Negative fixint or int 8/16/32/64, widened
    Int(i64),
    /// Positive fixint or uint 8/16/32/64, widened
    UInt(u64),
    /// float 32, or a narrowed float 64 when doubles are disabled
    Float32(f32),
    /// float 64
    Float64(f64),
    /// fixstr, str 8/16/32
    Str(StrRef<'de>),
    /// bin 8/16/32
    Bin(BinRef<'de>),
    /// fixarray, array 16/32
    Array(ArrayRef),
    /// fixmap, map 16/32
    Map(MapRef),
}

impl<'de> Variant<'de> {
    /// Discriminant of this value
    pub const fn kind(&self) -> Kind {
        match self {
            Variant::Null => Kind::Null,
            Variant::Bool(_) => Kind::Bool,
            Variant::Int(_) => Kind::Int,
            Variant::UInt(_) => Kind::UInt,
            Variant::Float32(_) => Kind::Float32,
            Variant::Float64(_) => Kind::Float64,
            Variant::Str(_) => Kind::Str,
            Variant::Bin(_) => Kind::Bin,
            Variant::Array(_) => Kind::Array,
            Variant::Map(_) => Kind::Map,
        }
    }

    /// True for nil
    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Variant::Null)
    }

    /// Boolean value
    #[inline]
    pub const fn as_bool(&self) -> Option<bool> {
        match *self {
            Variant::Bool(b) => Some(b),
            _ => None,
        }
    }

    /// Integer value if it fits in `i64`
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Variant::Int(v) => Some(v),
            Variant::UInt(v) => i64::try_from(v).ok(),
            _ => None,
        }
    }

    /// Integer value if it fits in `u64`
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Variant::UInt(v) => Some(v),
            Variant::Int(v) => u64::try_from(v).ok(),
            _ => None,
        }
    }

    /// Numeric value as `f64`; integers convert with rounding
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Variant::Float32(v) => Some(f64::from(v)),
            Variant::Float64(v) => Some(v),
            Variant::Int(v) => Some(v as f64),
            Variant::UInt(v) => Some(v as f64),
            _ => None,
        }
    }

    /// String handle
    #[inline]
    pub const fn as_str_ref(&self) -> Option<StrRef<'de>> {
        match *self {
            Variant::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Binary handle
    #[inline]
    pub const fn as_bin_ref(&self) -> Option<BinRef<'de>> {
        match *self {
            Variant::Bin(b) => Some(b),
            _ => None,
        }
    }

    /// Array handle
    #[inline]
    pub const fn as_array(&self) -> Option<ArrayRef> {
        match *self {
            Variant::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Map handle
    #[inline]
    pub const fn as_map(&self) -> Option<MapRef> {
        match *self {
            Variant::Map(m) => Some(m),
            _ => None,
        }
    }
}
