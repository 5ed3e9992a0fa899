//! Memory Access Types.
//!
//! This module defines the classification of memory accesses used throughout the simulator.
//! These types are used for the following:
//! 1. **Dispatch:** Selecting the read or write-allocate path in the cache controller.
//! 2. **Trace Replay:** Describing each entry of a parsed access trace.
//! 3. **Statistics Tracking:** Categorizing accesses for the hit/miss report.

use std::fmt;

/// Type of memory access operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessKind {
    /// Data read access.
    ///
    /// Returns the cached byte, filling the block first on a miss.
    Read,

    /// Data write access carrying the byte to store.
    ///
    /// Write-allocate: the block is filled on a miss, then the line is marked dirty.
    Write(u8),
}

impl AccessKind {
    /// Returns `true` for [`AccessKind::Write`].
    #[inline]
    pub const fn is_write(self) -> bool {
        matches!(self, Self::Write(_))
    }
}

impl fmt::Display for AccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => write!(f, "R"),
            Self::Write(value) => write!(f, "W({value:#04x})"),
        }
    }
}
