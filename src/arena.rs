//! Index-based arena backing decoded trees
//!
//! Nodes live in one growable slot table and link to their next sibling by
//! index. Copied string and binary payloads live in two append-only buffers.
//! Every allocation is charged against an optional byte budget; once it is
//! exhausted allocation fails with [`Error::OutOfMemory`]. Nothing is freed
//! individually: [`Arena::reset`] drops everything at once and invalidates
//! every handle produced before it.

use alloc::string::String;
use alloc::vec::Vec;

use crate::cursor::Cursor;
use crate::error::{Error, Result};
use crate::variant::{ArrayRef, BinRef, MapRef, NodeId, Span, StrRef, Variant};

/// Budget charged for each array element or map entry
pub const SLOT_SIZE: usize = core::mem::size_of::<Slot<'static>>();

#[derive(Debug, Clone, Copy)]
struct Slot<'de> {
    key: Option<StrRef<'de>>,
    value: Variant<'de>,
    next: Option<NodeId>,
}

/// Monotonic store for tree nodes and copied payloads
#[derive(Debug, Clone)]
pub struct Arena<'de> {
    slots: Vec<Slot<'de>>,
    bytes: Vec<u8>,
    text: String,
    used: usize,
    capacity: usize,
}

impl Default for Arena<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'de> Arena<'de> {
    /// Arena without a budget
    pub fn new() -> Self {
        Self::with_capacity(usize::MAX)
    }

    /// Arena that refuses allocations beyond `capacity` bytes in total
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::new(),
            bytes: Vec::new(),
            text: String::new(),
            used: 0,
            capacity,
        }
    }

    /// Bytes charged so far
    #[inline]
    pub fn used(&self) -> usize {
        self.used
    }

    /// Total budget in bytes
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Budget left
    #[inline]
    pub fn remaining(&self) -> usize {
        self.capacity - self.used
    }

    /// Number of node slots allocated
    #[inline]
    pub fn node_count(&self) -> usize {
        self.slots.len()
    }

    /// Drop every node and payload; previously issued handles become invalid
    pub fn reset(&mut self) {
        self.slots.clear();
        self.bytes.clear();
        self.text.clear();
        self.used = 0;
    }

    /// Reserve `size` zeroed bytes of payload storage
    pub fn allocate(&mut self, size: usize) -> Result<Span> {
        self.charge(size)?;
        let start = self.bytes.len();
        self.bytes.resize(start + size, 0);
        Ok(Span { start, len: size })
    }

    /// Copy a binary payload into the arena
    pub fn alloc_bytes(&mut self, data: &[u8]) -> Result<BinRef<'de>> {
        let span = self.allocate(data.len())?;
        self.bytes[span.range()].copy_from_slice(data);
        Ok(BinRef::Owned(span))
    }

    /// Copy a string payload into the arena
    pub fn alloc_str(&mut self, s: &str) -> Result<StrRef<'de>> {
        self.charge(s.len())?;
        let start = self.text.len();
        self.text.push_str(s);
        Ok(StrRef::Owned(Span { start, len: s.len() }))
    }

    /// Read a `len`-byte UTF-8 payload from `cursor` directly into arena storage
    ///
    /// The budget is checked before anything is consumed. Nothing is kept or
    /// charged if the read fails.
    pub fn read_str<C: Cursor + ?Sized>(&mut self, cursor: &mut C, len: usize) -> Result<StrRef<'de>> {
        if len > self.remaining() {
            return Err(Error::OutOfMemory);
        }
        let start = self.text.len();
        cursor.read_str_into(&mut self.text, len)?;
        self.charge(len)?;
        Ok(StrRef::Owned(Span { start, len }))
    }

    /// Read a `len`-byte binary payload from `cursor` directly into arena storage
    pub fn read_bytes<C: Cursor + ?Sized>(&mut self, cursor: &mut C, len: usize) -> Result<BinRef<'de>> {
        if len > self.remaining() {
            return Err(Error::OutOfMemory);
        }
        let start = self.bytes.len();
        if let Err(e) = cursor.read_into(&mut self.bytes, len) {
            self.bytes.truncate(start);
            return Err(e);
        }
        self.charge(len)?;
        Ok(BinRef::Owned(Span { start, len }))
    }

    /// Resolve a string handle
    ///
    /// Stale handles from before a [`reset`](Self::reset) resolve to `""`.
    pub fn text(&self, s: StrRef<'de>) -> &str {
        match s {
            StrRef::Borrowed(s) => s,
            StrRef::Owned(span) => self.text.get(span.range()).unwrap_or(""),
        }
    }

    /// Resolve a binary handle
    pub fn bytes(&self, b: BinRef<'de>) -> &[u8] {
        match b {
            BinRef::Borrowed(b) => b,
            BinRef::Owned(span) => self.bytes.get(span.range()).unwrap_or(&[]),
        }
    }

    /// Iterate over array elements in wire order
    pub fn elements(&self, array: ArrayRef) -> Elements<'_, 'de> {
        Elements {
            arena: self,
            next: array.head,
            remaining: array.len,
        }
    }

    /// Iterate over map entries in wire order, duplicates included
    pub fn entries(&self, map: MapRef) -> Entries<'_, 'de> {
        Entries {
            arena: self,
            next: map.head,
            remaining: map.len,
        }
    }

    /// Value of the first entry whose key equals `key`
    pub fn get(&self, map: MapRef, key: &str) -> Option<&Variant<'de>> {
        self.entries(map).find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// Element at `index`
    pub fn element(&self, array: ArrayRef, index: usize) -> Option<&Variant<'de>> {
        self.elements(array).nth(index)
    }

    /// Structural equality of `a` (in `self`) and `b` (in `other`)
    ///
    /// Floats compare by bit pattern, so NaN equals an identical NaN.
    /// Storage mode is ignored: a borrowed string equals an owned copy.
    pub fn tree_eq<'o>(&self, a: &Variant<'de>, other: &Arena<'o>, b: &Variant<'o>) -> bool {
        match (a, b) {
            (Variant::Null, Variant::Null) => true,
            (Variant::Bool(x), Variant::Bool(y)) => x == y,
            (Variant::Int(x), Variant::Int(y)) => x == y,
            (Variant::UInt(x), Variant::UInt(y)) => x == y,
            (Variant::Float32(x), Variant::Float32(y)) => x.to_bits() == y.to_bits(),
            (Variant::Float64(x), Variant::Float64(y)) => x.to_bits() == y.to_bits(),
            (Variant::Str(x), Variant::Str(y)) => self.text(*x) == other.text(*y),
            (Variant::Bin(x), Variant::Bin(y)) => self.bytes(*x) == other.bytes(*y),
            (Variant::Array(x), Variant::Array(y)) => {
                x.len() == y.len()
                    && self
                        .elements(*x)
                        .zip(other.elements(*y))
                        .all(|(l, r)| self.tree_eq(l, other, r))
            }
            (Variant::Map(x), Variant::Map(y)) => {
                x.len() == y.len()
                    && self
                        .entries(*x)
                        .zip(other.entries(*y))
                        .all(|((lk, lv), (rk, rv))| lk == rk && self.tree_eq(lv, other, rv))
            }
            _ => false,
        }
    }

    fn charge(&mut self, size: usize) -> Result<()> {
        let used = self.used.checked_add(size).ok_or(Error::OutOfMemory)?;
        if used > self.capacity {
            return Err(Error::OutOfMemory);
        }
        self.used = used;
        Ok(())
    }

    fn push_slot(&mut self, key: Option<StrRef<'de>>, value: Variant<'de>) -> Result<NodeId> {
        let id = u32::try_from(self.slots.len()).map_err(|_| Error::OutOfMemory)?;
        self.charge(SLOT_SIZE)?;
        self.slots.push(Slot {
            key,
            value,
            next: None,
        });
        Ok(NodeId(id))
    }
}

/// Appends linked slots for one container under construction
#[derive(Debug, Default)]
pub(crate) struct ListBuilder {
    head: Option<NodeId>,
    tail: Option<NodeId>,
    len: usize,
}

impl ListBuilder {
    pub(crate) fn push<'de>(
        &mut self,
        arena: &mut Arena<'de>,
        key: Option<StrRef<'de>>,
        value: Variant<'de>,
    ) -> Result<()> {
        let id = arena.push_slot(key, value)?;
        match self.tail {
            Some(tail) => arena.slots[tail.index()].next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        self.len += 1;
        Ok(())
    }

    pub(crate) fn into_array(self) -> ArrayRef {
        ArrayRef {
            head: self.head,
            len: self.len,
        }
    }

    pub(crate) fn into_map(self) -> MapRef {
        MapRef {
            head: self.head,
            len: self.len,
        }
    }
}

/// Iterator over the elements of an [`ArrayRef`]
#[derive(Debug, Clone)]
pub struct Elements<'a, 'de> {
    arena: &'a Arena<'de>,
    next: Option<NodeId>,
    remaining: usize,
}

impl<'a, 'de> Iterator for Elements<'a, 'de> {
    type Item = &'a Variant<'de>;

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.arena.slots.get(self.next?.index())?;
        self.next = slot.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(&slot.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}

/// Iterator over the entries of a [`MapRef`]
#[derive(Debug, Clone)]
pub struct Entries<'a, 'de> {
    arena: &'a Arena<'de>,
    next: Option<NodeId>,
    remaining: usize,
}

impl<'a, 'de> Iterator for Entries<'a, 'de> {
    type Item = (&'a str, &'a Variant<'de>);

    fn next(&mut self) -> Option<Self::Item> {
        let arena = self.arena;
        let slot = arena.slots.get(self.next?.index())?;
        self.next = slot.next;
        self.remaining = self.remaining.saturating_sub(1);
        let key = slot.key.map_or("", |k| arena.text(k));
        Some((key, &slot.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}
