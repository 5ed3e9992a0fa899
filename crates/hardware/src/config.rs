//! Configuration system for the cache simulator.
//!
//! This module defines all configuration structures and enums used to parameterize
//! the simulator. It provides:
//! 1. **Defaults:** Reference geometry (4 KiB, 4-way, 64-byte blocks, 16 sets).
//! 2. **Structures:** General options and cache geometry.
//! 3. **Enums:** Replacement policy selection.
//!
//! Configuration is deserialized from JSON or built with `Config::default()`. The geometry
//! is only checked when it is turned into a [`Geometry`](crate::cache::Geometry).

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::SimError;

/// Default configuration constants for the simulator.
mod defaults {
    /// Default cache capacity in bytes (4 KiB).
    pub const CACHE_SIZE: usize = 4096;

    /// Default associativity (4-way).
    pub const CACHE_WAYS: usize = 4;

    /// Default tag width: the 6 most significant address bits.
    pub const TAG_BITS: u32 = 6;

    /// Default set-index width (16 sets).
    pub const INDEX_BITS: u32 = 4;

    /// Default byte-offset width (64-byte blocks).
    pub const OFFSET_BITS: u32 = 6;
}

/// Cache replacement policy algorithms.
///
/// Specifies the algorithm used to select which way to evict when a new block must
/// be installed in a set whose ways are all valid. Sets with an invalid way always
/// fill that way first, whatever the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReplacementPolicy {
    /// Least Recently Used replacement policy.
    ///
    /// Evicts the way that was accessed least recently.
    #[default]
    #[serde(alias = "Lru", alias = "lru")]
    Lru,
    /// Pseudo-LRU replacement policy.
    ///
    /// Approximates LRU with one MRU bit per way.
    #[serde(alias = "Plru", alias = "plru")]
    Plru,
    /// First In First Out replacement policy.
    ///
    /// Evicts ways in round-robin order per set.
    #[serde(alias = "Fifo", alias = "fifo")]
    Fifo,
    /// Pseudo-random replacement policy.
    ///
    /// Uses a fixed-seed xorshift generator, so replays are deterministic.
    #[serde(alias = "Random", alias = "random")]
    Random,
    /// Most Recently Used replacement policy.
    ///
    /// Evicts the way that was accessed most recently.
    #[serde(alias = "Mru", alias = "mru")]
    Mru,
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use memsim_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.cache.size_bytes, 4096);
/// assert_eq!(config.cache.ways, 4);
/// ```
///
/// Deserializing from JSON:
///
/// ```
/// use memsim_core::config::{Config, ReplacementPolicy};
///
/// let json = r#"{
///     "general": { "trace_accesses": true },
///     "cache": {
///         "size_bytes": 2048,
///         "ways": 2,
///         "tag_bits": 6,
///         "index_bits": 4,
///         "offset_bits": 6,
///         "policy": "Fifo"
///     }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert!(config.general.trace_accesses);
/// assert_eq!(config.cache.policy, ReplacementPolicy::Fifo);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Cache geometry and policy
    #[serde(default)]
    pub cache: CacheConfig,
}

impl Config {
    /// Parses a configuration from a JSON document.
    ///
    /// Missing sections and fields fall back to their defaults.
    ///
    /// # Errors
    ///
    /// [`SimError::Json`] if the document is not valid JSON or a field has the wrong type.
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// [`SimError::Io`] if the file cannot be read, otherwise whatever
    /// [`Config::from_json`] reports.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }
}

/// General simulation settings and options.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneralConfig {
    /// Emit a trace event for every read and write (hit/miss, fields, way)
    #[serde(default)]
    pub trace_accesses: bool,
}

/// Cache geometry and replacement policy.
///
/// The three field widths must cover a 16-bit address and
/// `2^index_bits * ways * 2^offset_bits` must equal `size_bytes`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CacheConfig {
    /// Total cache capacity in bytes
    #[serde(default = "CacheConfig::default_size")]
    pub size_bytes: usize,

    /// Associativity (ways per set)
    #[serde(default = "CacheConfig::default_ways")]
    pub ways: usize,

    /// Tag field width in bits
    #[serde(default = "CacheConfig::default_tag_bits")]
    pub tag_bits: u32,

    /// Set-index field width in bits
    #[serde(default = "CacheConfig::default_index_bits")]
    pub index_bits: u32,

    /// Byte-offset field width in bits
    #[serde(default = "CacheConfig::default_offset_bits")]
    pub offset_bits: u32,

    /// Replacement policy
    #[serde(default)]
    pub policy: ReplacementPolicy,
}

impl CacheConfig {
    /// Returns the default cache capacity in bytes.
    const fn default_size() -> usize {
        defaults::CACHE_SIZE
    }

    /// Returns the default associativity.
    const fn default_ways() -> usize {
        defaults::CACHE_WAYS
    }

    /// Returns the default tag width.
    const fn default_tag_bits() -> u32 {
        defaults::TAG_BITS
    }

    /// Returns the default set-index width.
    const fn default_index_bits() -> u32 {
        defaults::INDEX_BITS
    }

    /// Returns the default byte-offset width.
    const fn default_offset_bits() -> u32 {
        defaults::OFFSET_BITS
    }
}

impl Default for CacheConfig {
    /// Creates the reference geometry: 4 KiB, 4-way, 16 sets of 64-byte blocks, LRU.
    fn default() -> Self {
        Self {
            size_bytes: defaults::CACHE_SIZE,
            ways: defaults::CACHE_WAYS,
            tag_bits: defaults::TAG_BITS,
            index_bits: defaults::INDEX_BITS,
            offset_bits: defaults::OFFSET_BITS,
            policy: ReplacementPolicy::default(),
        }
    }
}
