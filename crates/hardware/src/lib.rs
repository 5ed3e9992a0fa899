//! Memory hierarchy simulator library.
//!
//! This crate simulates the memory system of a simple 16-bit word-addressable CPU:
//! 1. **Cache:** N-way set-associative cache with address decoding, lookup, fill and
//!    pluggable replacement policies.
//! 2. **Memory:** A flat 64 KiB backing store with bulk loading and hex dumps.
//! 3. **System:** The procedural API tying both together (reset, load, read, write, hit check).
//! 4. **Simulation:** Image/trace loading, configuration, and statistics.
//!
//! ```
//! use memsim_core::{Config, System};
//!
//! let mut system = System::new(&Config::default()).unwrap();
//! system.load_bytes(0, b"hello world\n\0").unwrap();
//! assert!(!system.is_hit(0x0004));
//! assert_eq!(system.read_byte(0x0004), b'o');
//! assert!(system.is_hit(0x003F));
//! ```

/// Set-associative cache (geometry, lines, sets, policies, controller).
pub mod cache;
/// Common types and constants (decoded addresses, access kinds, errors).
pub mod common;
/// Simulator configuration (defaults, policy enum, JSON loading).
pub mod config;
/// Image and trace loading.
pub mod sim;
/// Backing store and the top-level system.
pub mod soc;
/// Cache statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Error returned by the procedural API.
pub use crate::common::SimError;
/// Top-level system (backing store plus cache); construct with `System::new`.
pub use crate::soc::System;
