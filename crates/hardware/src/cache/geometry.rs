//! Cache geometry and address decoding.
//!
//! A [`Geometry`] is the validated form of a [`CacheConfig`]: it fixes how a 16-bit
//! address splits into tag, set index and byte offset. Decoding is pure and total:
//! every `u16` is a valid address, so none of the decode functions can fail.
//!
//! ```text
//!  15            10 9         6 5            0
//! +----------------+-----------+--------------+
//! |  tag (6 bits)  | set (4)   | offset (6)   |   reference geometry
//! +----------------+-----------+--------------+
//! ```

use crate::common::{ADDRESS_WIDTH, AddrFields, BlockRange, ConfigError};
use crate::config::CacheConfig;

/// Validated cache geometry.
///
/// Guarantees `tag_bits + index_bits + offset_bits == 16` and
/// `num_sets * ways * block_size == size_bytes`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    tag_bits: u32,
    index_bits: u32,
    offset_bits: u32,
    ways: usize,
    size_bytes: usize,
}

impl Geometry {
    /// Builds a geometry from raw field widths, associativity and capacity.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::FieldWidthMismatch`] if the widths do not sum to the address width.
    /// * [`ConfigError::ZeroWays`] if `ways` is zero.
    /// * [`ConfigError::SizeMismatch`] if `2^index_bits * ways * 2^offset_bits != size_bytes`.
    pub fn new(
        tag_bits: u32,
        index_bits: u32,
        offset_bits: u32,
        ways: usize,
        size_bytes: usize,
    ) -> Result<Self, ConfigError> {
        let covered = tag_bits
            .checked_add(index_bits)
            .and_then(|bits| bits.checked_add(offset_bits));
        if covered != Some(ADDRESS_WIDTH) {
            return Err(ConfigError::FieldWidthMismatch {
                tag_bits,
                index_bits,
                offset_bits,
                address_width: ADDRESS_WIDTH,
            });
        }
        if ways == 0 {
            return Err(ConfigError::ZeroWays);
        }

        let num_sets = 1usize << index_bits;
        let block_size = 1usize << offset_bits;
        let product = num_sets
            .checked_mul(ways)
            .and_then(|lines| lines.checked_mul(block_size));
        if product != Some(size_bytes) {
            return Err(ConfigError::SizeMismatch {
                num_sets,
                ways,
                block_size,
                computed: product.unwrap_or(usize::MAX),
                size_bytes,
            });
        }

        Ok(Self {
            tag_bits,
            index_bits,
            offset_bits,
            ways,
            size_bytes,
        })
    }

    /// Validates a [`CacheConfig`] into a geometry.
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`] that [`Geometry::new`] reports for the configured values.
    pub fn from_config(config: &CacheConfig) -> Result<Self, ConfigError> {
        Self::new(
            config.tag_bits,
            config.index_bits,
            config.offset_bits,
            config.ways,
            config.size_bytes,
        )
    }

    /// Width of the tag field.
    #[inline]
    pub const fn tag_bits(&self) -> u32 {
        self.tag_bits
    }

    /// Width of the set-index field.
    #[inline]
    pub const fn index_bits(&self) -> u32 {
        self.index_bits
    }

    /// Width of the byte-offset field.
    #[inline]
    pub const fn offset_bits(&self) -> u32 {
        self.offset_bits
    }

    /// Bytes per cache line (`2^offset_bits`).
    #[inline]
    pub const fn block_size(&self) -> usize {
        1 << self.offset_bits
    }

    /// Number of sets (`2^index_bits`).
    #[inline]
    pub const fn num_sets(&self) -> usize {
        1 << self.index_bits
    }

    /// Ways per set.
    #[inline]
    pub const fn ways(&self) -> usize {
        self.ways
    }

    /// Total data capacity in bytes.
    #[inline]
    pub const fn size_bytes(&self) -> usize {
        self.size_bytes
    }

    /// Number of distinct tag values (`2^tag_bits`).
    #[inline]
    pub const fn num_tags(&self) -> usize {
        1 << self.tag_bits
    }

    /// Tag field of `addr`.
    #[inline]
    pub const fn tag(&self, addr: u16) -> u16 {
        // u32 so a zero-width tag (shift by 16) stays defined.
        ((addr as u32) >> (self.index_bits + self.offset_bits)) as u16
    }

    /// Set index of `addr`, always in `0..num_sets()`.
    #[inline]
    pub const fn set_index(&self, addr: u16) -> usize {
        ((addr as usize) >> self.offset_bits) & (self.num_sets() - 1)
    }

    /// Byte offset of `addr` within its block, always in `0..block_size()`.
    #[inline]
    pub const fn offset(&self, addr: u16) -> usize {
        (addr as usize) & (self.block_size() - 1)
    }

    /// First address of the block containing `addr`.
    #[inline]
    pub const fn block_start(&self, addr: u16) -> u16 {
        addr - self.offset(addr) as u16
    }

    /// Last address of the block containing `addr`.
    #[inline]
    pub const fn block_end(&self, addr: u16) -> u16 {
        self.block_start(addr) + (self.block_size() - 1) as u16
    }

    /// Inclusive block bounds of `addr`.
    #[inline]
    pub const fn block_range(&self, addr: u16) -> BlockRange {
        BlockRange {
            start: self.block_start(addr),
            end: self.block_end(addr),
        }
    }

    /// Splits `addr` into its tag, set index and offset.
    #[inline]
    pub const fn decode(&self, addr: u16) -> AddrFields {
        AddrFields {
            tag: self.tag(addr),
            index: self.set_index(addr),
            offset: self.offset(addr),
        }
    }

    /// Reassembles an address from its fields; the inverse of [`Geometry::decode`].
    ///
    /// Fields wider than their configured width are truncated to it.
    #[inline]
    pub const fn compose(&self, fields: AddrFields) -> u16 {
        let tag = (fields.tag as u32) << (self.index_bits + self.offset_bits);
        let index = ((fields.index & (self.num_sets() - 1)) as u32) << self.offset_bits;
        let offset = (fields.offset & (self.block_size() - 1)) as u32;
        (tag | index | offset) as u16
    }
}

impl Default for Geometry {
    /// The reference geometry: 6/4/6 split, 4 ways, 4 KiB.
    fn default() -> Self {
        Self {
            tag_bits: 6,
            index_bits: 4,
            offset_bits: 6,
            ways: 4,
            size_bytes: 4096,
        }
    }
}
