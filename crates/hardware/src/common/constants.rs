//! Global System Constants.
//!
//! This module defines system-wide constants used across the simulator. It includes:
//! 1. **Address Constants:** Address width and the size of the addressable space.
//! 2. **Reporting Constants:** Layout parameters for memory dumps.

/// Width of a CPU address in bits.
pub const ADDRESS_WIDTH: u32 = 16;

/// Number of addressable bytes (64 KiB).
///
/// Every `u16` is a valid address, so the backing store is exactly this large.
pub const ADDRESS_SPACE: usize = 1 << ADDRESS_WIDTH;

/// Bytes rendered per row by [`BackingStore::dump`](crate::soc::memory::BackingStore::dump).
pub const DUMP_ROW_BYTES: usize = 16;
