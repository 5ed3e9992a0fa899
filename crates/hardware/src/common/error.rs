//! Error definitions.
//!
//! This module defines the error handling for the simulator. It provides:
//! 1. **Configuration Errors:** Geometry that violates the sizing invariants; fatal at construction.
//! 2. **Simulation Errors:** Out-of-range backing-store writes plus the ambient failures of
//!    loading configuration files, images and access traces.
//!
//! Decode, lookup and victim selection are total over the address domain and never fail.

use thiserror::Error;

/// Cache geometry rejected at construction time.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Tag, index and offset widths do not add up to the address width.
    #[error(
        "address fields do not cover the address: tag {tag_bits} + index {index_bits} + offset {offset_bits} != {address_width} bits"
    )]
    FieldWidthMismatch {
        /// Configured tag width.
        tag_bits: u32,
        /// Configured set-index width.
        index_bits: u32,
        /// Configured byte-offset width.
        offset_bits: u32,
        /// Width every address must be split into.
        address_width: u32,
    },

    /// A cache needs at least one way per set.
    #[error("associativity must be at least 1")]
    ZeroWays,

    /// `sets * ways * block_size` disagrees with the configured capacity.
    #[error(
        "cache size mismatch: {num_sets} sets x {ways} ways x {block_size} bytes = {computed}, configured {size_bytes}"
    )]
    SizeMismatch {
        /// Number of sets implied by the index width.
        num_sets: usize,
        /// Configured associativity.
        ways: usize,
        /// Block size implied by the offset width.
        block_size: usize,
        /// Product of the three, `usize::MAX` if it overflows.
        computed: usize,
        /// Configured capacity in bytes.
        size_bytes: usize,
    },
}

/// Errors reported by the simulator's procedural API.
#[derive(Debug, Error)]
pub enum SimError {
    /// Invalid cache geometry.
    #[error("invalid cache configuration: {0}")]
    Config(#[from] ConfigError),

    /// A bulk load would run past the end of the address space.
    ///
    /// The backing store is left untouched.
    #[error("byte range {start:#06x}+{len} exceeds the {limit}-byte address space")]
    OutOfRange {
        /// Requested start address.
        start: usize,
        /// Requested length in bytes.
        len: usize,
        /// Size of the address space.
        limit: usize,
    },

    /// Reading a configuration file, image or trace failed.
    #[error("i/o error on '{path}': {source}")]
    Io {
        /// File being accessed.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A JSON configuration could not be deserialized.
    #[error("malformed configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// A trace file line could not be parsed.
    #[error("trace line {line}: {reason}")]
    Trace {
        /// 1-based line number.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },
}
