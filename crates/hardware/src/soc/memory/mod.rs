//! Physical System Memory (RAM).
//!
//! This module implements the flat backing store behind the cache. It provides:
//! 1. **Storage:** One zero-initialized byte per 16-bit address (64 KiB).
//! 2. **Access:** Byte reads/writes and validated bulk loads.
//! 3. **Block transfer:** Whole-block reads for fills and writes for write-backs.
//! 4. **Dump:** A hex + ASCII rendering of any address range.

use std::fmt::Write as _;

use crate::common::constants::DUMP_ROW_BYTES;
use crate::common::{ADDRESS_SPACE, BlockRange, SimError};

/// Flat byte-addressable memory covering the whole address space.
#[derive(Clone, PartialEq, Eq)]
pub struct BackingStore {
    bytes: Box<[u8]>,
}

impl BackingStore {
    /// Creates a zeroed store of [`ADDRESS_SPACE`] bytes.
    pub fn new() -> Self {
        Self {
            bytes: vec![0; ADDRESS_SPACE].into_boxed_slice(),
        }
    }

    /// Returns the size of the store in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// The store is never empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Reads a single byte.
    #[inline]
    pub fn read_u8(&self, addr: u16) -> u8 {
        self.bytes[addr as usize]
    }

    /// Writes a single byte.
    #[inline]
    pub fn write_u8(&mut self, addr: u16, val: u8) {
        self.bytes[addr as usize] = val;
    }

    /// Reads `len` bytes starting at `start`.
    ///
    /// # Errors
    ///
    /// [`SimError::OutOfRange`] if the range runs past the end of the address space.
    pub fn read_slice(&self, start: u16, len: usize) -> Result<&[u8], SimError> {
        let range = Self::checked_range(start, len)?;
        Ok(&self.bytes[range])
    }

    /// Copies `data` into the store starting at `start`.
    ///
    /// The whole range is validated first, so a rejected load writes nothing.
    ///
    /// # Errors
    ///
    /// [`SimError::OutOfRange`] if `start + data.len()` exceeds the address space.
    pub fn load(&mut self, start: u16, data: &[u8]) -> Result<(), SimError> {
        let range = Self::checked_range(start, data.len())?;
        self.bytes[range].copy_from_slice(data);
        Ok(())
    }

    /// Zeroes every byte.
    pub fn clear(&mut self) {
        self.bytes.fill(0);
    }

    /// Contents of a cache block. Block ranges are always inside the address space.
    pub(crate) fn block(&self, range: BlockRange) -> &[u8] {
        &self.bytes[range.start as usize..=range.end as usize]
    }

    /// Writes a whole block back (dirty eviction or flush).
    pub(crate) fn write_block(&mut self, start: u16, data: &[u8]) {
        let start = start as usize;
        self.bytes[start..start + data.len()].copy_from_slice(data);
    }

    /// Renders `len` bytes from `start` as rows of 16 hex bytes plus their ASCII form.
    ///
    /// The range is clipped at the end of the address space.
    ///
    /// ```text
    /// 0x0000: 68 65 6c 6c 6f 20 77 6f 72 6c 64 0a 00 00 00 00  |hello world.....|
    /// ```
    pub fn dump(&self, start: u16, len: usize) -> String {
        let start = start as usize;
        let end = start.saturating_add(len).min(self.bytes.len());
        let mut out = String::new();

        for (row, chunk) in self.bytes[start..end].chunks(DUMP_ROW_BYTES).enumerate() {
            let hex: Vec<String> = chunk.iter().map(|b| format!("{b:02x}")).collect();
            let ascii: String = chunk
                .iter()
                .map(|&b| {
                    if b.is_ascii_graphic() || b == b' ' {
                        b as char
                    } else {
                        '.'
                    }
                })
                .collect();
            let _ = writeln!(
                out,
                "{:#06x}: {:<width$}  |{}|",
                start + row * DUMP_ROW_BYTES,
                hex.join(" "),
                ascii,
                width = DUMP_ROW_BYTES * 3 - 1
            );
        }
        out
    }

    fn checked_range(start: u16, len: usize) -> Result<std::ops::Range<usize>, SimError> {
        let begin = start as usize;
        begin
            .checked_add(len)
            .filter(|&end| end <= ADDRESS_SPACE)
            .map(|end| begin..end)
            .ok_or(SimError::OutOfRange {
                start: begin,
                len,
                limit: ADDRESS_SPACE,
            })
    }
}

impl Default for BackingStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BackingStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackingStore")
            .field("len", &self.bytes.len())
            .field("nonzero", &self.bytes.iter().filter(|&&b| b != 0).count())
            .finish()
    }
}
