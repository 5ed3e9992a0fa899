//! Decoded address types.
//!
//! This module defines the strong types produced by splitting a 16-bit CPU address
//! against a cache geometry. It provides the following:
//! 1. **Field Decomposition:** `AddrFields` holds the tag, set index and byte offset.
//! 2. **Block Bounds:** `BlockRange` holds the inclusive first/last address of a block.

use std::fmt;

/// An address split into the three fields a set-associative cache consumes.
///
/// Produced by [`Geometry::decode`](crate::cache::Geometry::decode); the split is
/// lossless, so [`Geometry::compose`](crate::cache::Geometry::compose) rebuilds the
/// original address exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AddrFields {
    /// High-order bits identifying which block occupies a line.
    pub tag: u16,
    /// Mid-order bits selecting the set.
    pub index: usize,
    /// Low-order bits selecting a byte within the block.
    pub offset: usize,
}

impl fmt::Display for AddrFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tag={:#x} set={} offset={}",
            self.tag, self.index, self.offset
        )
    }
}

/// Inclusive address range covered by one cache block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BlockRange {
    /// First address of the block (offset zero).
    pub start: u16,
    /// Last address of the block (`start + block_size - 1`).
    pub end: u16,
}

impl BlockRange {
    /// Number of bytes in the block.
    #[inline]
    pub const fn len(&self) -> usize {
        (self.end - self.start) as usize + 1
    }

    /// A block always spans at least one byte.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Returns `true` if `addr` falls inside the block.
    #[inline]
    pub const fn contains(&self, addr: u16) -> bool {
        self.start <= addr && addr <= self.end
    }

    /// Iterates every address of the block in ascending order.
    pub fn addresses(&self) -> impl Iterator<Item = u16> {
        self.start..=self.end
    }
}

impl fmt::Display for BlockRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:#06x}..={:#06x}]", self.start, self.end)
    }
}
