//! System construction and top-level `System` type.
//!
//! This module builds the complete memory hierarchy from configuration. It performs:
//! 1. **Validation:** Turns the cache configuration into a checked [`Geometry`].
//! 2. **Assembly:** Creates the backing store and the cache controller side by side.
//! 3. **Procedural API:** Reset, bulk load, byte read/write, hit checks, flush and dumps.
//! 4. **Trace replay:** Runs a parsed access trace and returns its hit/miss trace.
//!
//! Each `System` is an independent machine; nothing is process-global.

use tracing::info;

use crate::cache::{AccessOutcome, Cache, CacheController, FillOutcome, Geometry, Lookup};
use crate::common::SimError;
use crate::config::Config;
use crate::sim::loader::TraceOp;
use crate::soc::memory::BackingStore;
use crate::stats::CacheStats;

/// Top-level system instance: a backing store and the cache in front of it.
#[derive(Debug)]
pub struct System {
    memory: BackingStore,
    controller: CacheController,
}

impl System {
    /// Builds a new system from configuration.
    ///
    /// # Errors
    ///
    /// [`SimError::Config`] if the cache geometry violates the sizing invariants.
    pub fn new(config: &Config) -> Result<Self, SimError> {
        let geometry = Geometry::from_config(&config.cache)?;
        let mut controller = CacheController::new(geometry, config.cache.policy);
        controller.set_trace_accesses(config.general.trace_accesses);

        info!(
            size = geometry.size_bytes(),
            ways = geometry.ways(),
            sets = geometry.num_sets(),
            block = geometry.block_size(),
            policy = ?config.cache.policy,
            "built cache"
        );

        let mut system = Self {
            memory: BackingStore::new(),
            controller,
        };
        system.reset();
        Ok(system)
    }

    /// Zeroes every backing-store byte and returns every cache line to `Invalid`.
    ///
    /// Replacement state and statistics are reset too, so replaying an access sequence
    /// after `reset` reproduces the same hit/miss trace.
    pub fn reset(&mut self) {
        self.memory.clear();
        self.controller.reset();
        info!("system reset");
    }

    /// Copies `bytes` into the backing store starting at `start`.
    ///
    /// Cached copies of the affected blocks are not updated.
    ///
    /// # Errors
    ///
    /// [`SimError::OutOfRange`] if the range exceeds the address space; nothing is written.
    pub fn load_bytes(&mut self, start: u16, bytes: &[u8]) -> Result<(), SimError> {
        self.memory.load(start, bytes)
    }

    /// Reads the byte at `addr` through the cache, filling its block on a miss.
    pub fn read_byte(&mut self, addr: u16) -> u8 {
        self.controller.read(addr, &mut self.memory)
    }

    /// Writes `value` at `addr` through the cache (write-allocate, write-back).
    pub fn write_byte(&mut self, addr: u16, value: u8) {
        self.controller.write(addr, value, &mut self.memory);
    }

    /// Residency check: whether `addr` is resident. Never mutates state.
    pub fn is_hit(&self, addr: u16) -> bool {
        self.controller.is_hit(addr)
    }

    /// Associative lookup of `addr`. Never mutates state.
    pub fn lookup(&self, addr: u16) -> Lookup {
        self.controller.lookup(addr)
    }

    /// Loads the block containing `addr` into the cache.
    pub fn fill(&mut self, addr: u16) -> FillOutcome {
        self.controller.fill(addr, &mut self.memory)
    }

    /// Writes back all dirty lines and invalidates the cache.
    ///
    /// Returns the number of lines written back.
    pub fn flush(&mut self) -> usize {
        self.controller.flush(&mut self.memory)
    }

    /// Reads the backing store directly, bypassing the cache.
    pub fn peek(&self, addr: u16) -> u8 {
        self.memory.read_u8(addr)
    }

    /// Hex dump of the backing store (see [`BackingStore::dump`]).
    pub fn dump(&self, start: u16, len: usize) -> String {
        self.memory.dump(start, len)
    }

    /// Replays `ops` in order and returns one outcome per access.
    pub fn run_trace(&mut self, ops: &[TraceOp]) -> Vec<AccessOutcome> {
        ops.iter()
            .map(|op| self.controller.access(op.addr, op.kind, &mut self.memory))
            .collect()
    }

    /// Validated cache geometry.
    pub const fn geometry(&self) -> &Geometry {
        self.controller.geometry()
    }

    /// Cache arrays, for inspection.
    pub const fn cache(&self) -> &Cache {
        self.controller.cache()
    }

    /// Backing store, for inspection.
    pub const fn memory(&self) -> &BackingStore {
        &self.memory
    }

    /// Access statistics since the last reset.
    pub const fn stats(&self) -> &CacheStats {
        self.controller.stats()
    }
}
