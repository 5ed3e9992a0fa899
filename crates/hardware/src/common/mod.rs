//! Common utilities and types used throughout the cache simulator.
//!
//! This module provides fundamental building blocks that are shared across all components
//! of the simulator. It includes:
//! 1. **Address Types:** Decoded address fields and block ranges.
//! 2. **Constants:** Address width and address-space size.
//! 3. **Memory Access:** Read/write classification of accesses.
//! 4. **Error Handling:** Configuration and simulation error types.

/// Decoded address types (fields and block ranges).
pub mod addr;

/// Common constants used throughout the simulator.
pub mod constants;

/// Memory access type definitions.
pub mod data;

/// Error types.
pub mod error;

pub use addr::{AddrFields, BlockRange};
pub use constants::{ADDRESS_SPACE, ADDRESS_WIDTH};
pub use data::AccessKind;
pub use error::{ConfigError, SimError};
