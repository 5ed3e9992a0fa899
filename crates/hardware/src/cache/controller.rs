//! Cache Controller.
//!
//! This module orchestrates the address decoder, the cache arrays and the backing store.
//! It performs:
//! 1. **Lookup:** Associative tag match across the ways of the decoded set, side-effect free.
//! 2. **Fill:** Victim selection (invalid way first, then the replacement policy), dirty
//!    write-back, and block transfer from the backing store.
//! 3. **Access:** Load-on-demand reads and write-allocate writes.
//! 4. **Maintenance:** Whole-cache flush and reset.
//!
//! Line state machine: `Invalid -> (fill) -> Valid/Clean -> (write) -> Valid/Dirty
//! -> (evict or flush, written back) -> Invalid`.

use tracing::{debug, trace};

use super::policies::{self, ReplacementPolicy};
use super::{Cache, Geometry};
use crate::common::{AccessKind, AddrFields};
use crate::config::ReplacementPolicy as PolicyType;
use crate::soc::memory::BackingStore;
use crate::stats::CacheStats;

/// Result of an associative lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lookup {
    /// A valid line in `way` holds the block.
    Hit {
        /// Matching way (lowest index if several ever matched).
        way: usize,
    },
    /// No valid line in the set holds the block.
    Miss,
}

impl Lookup {
    /// Returns `true` for [`Lookup::Hit`].
    #[inline]
    pub const fn is_hit(self) -> bool {
        matches!(self, Self::Hit { .. })
    }
}

/// What a fill did to the target set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FillOutcome {
    /// Way that now holds the block.
    pub way: usize,
    /// Start address of the valid block that was displaced, if any.
    pub evicted: Option<u16>,
    /// Whether the displaced (or refilled) line was dirty and got written back.
    pub wrote_back: bool,
}

/// Result of one read or write through the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccessOutcome {
    /// Accessed address.
    pub addr: u16,
    /// Read or write.
    pub kind: AccessKind,
    /// Whether the block was resident before the access.
    pub hit: bool,
    /// Way that served the access.
    pub way: usize,
    /// Byte read, or byte written.
    pub value: u8,
    /// Start address of the block evicted by the miss fill, if any.
    pub evicted: Option<u16>,
}

/// Set-associative cache controller with a pluggable replacement policy.
///
/// Owns the cache arrays, the policy state and the statistics. The backing store is
/// owned elsewhere and passed to every operation that may move data.
#[derive(Debug)]
pub struct CacheController {
    cache: Cache,
    policy_kind: PolicyType,
    policy: Box<dyn ReplacementPolicy>,
    stats: CacheStats,
    trace_accesses: bool,
}

impl CacheController {
    /// Creates a cold controller for `geometry` using the `policy` replacement algorithm.
    pub fn new(geometry: Geometry, policy: PolicyType) -> Self {
        Self::with_policy(
            geometry,
            policy,
            policies::build(policy, geometry.num_sets(), geometry.ways()),
        )
    }

    /// Creates a cold controller with a caller-supplied replacement policy.
    ///
    /// `kind` is only reported back through [`CacheController::policy_kind`].
    pub fn with_policy(
        geometry: Geometry,
        kind: PolicyType,
        policy: Box<dyn ReplacementPolicy>,
    ) -> Self {
        Self {
            cache: Cache::new(geometry),
            policy_kind: kind,
            policy,
            stats: CacheStats::default(),
            trace_accesses: false,
        }
    }

    /// Enables a trace event for every read and write.
    pub const fn set_trace_accesses(&mut self, enabled: bool) {
        self.trace_accesses = enabled;
    }

    /// Cache arrays.
    #[inline]
    pub const fn cache(&self) -> &Cache {
        &self.cache
    }

    /// Geometry of the cache.
    #[inline]
    pub const fn geometry(&self) -> &Geometry {
        self.cache.geometry()
    }

    /// Configured replacement policy.
    #[inline]
    pub const fn policy_kind(&self) -> PolicyType {
        self.policy_kind
    }

    /// Access statistics since the last reset.
    #[inline]
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Searches the decoded set for a valid line with an equal tag.
    ///
    /// Ways are scanned in order `0..ways`; the first match wins. Never mutates state.
    pub fn lookup(&self, addr: u16) -> Lookup {
        let fields = self.geometry().decode(addr);
        self.cache
            .set(fields.index)
            .find(fields.tag)
            .map_or(Lookup::Miss, |way| Lookup::Hit { way })
    }

    /// Residency check: `true` if `addr` is resident. Leaves statistics and policy untouched.
    #[inline]
    pub fn is_hit(&self, addr: u16) -> bool {
        self.lookup(addr).is_hit()
    }

    /// Loads the block containing `addr` from `memory` into the cache.
    ///
    /// A block that is already resident is re-read into its current way, so a set never
    /// holds two valid lines with the same tag. Otherwise an invalid way is preferred
    /// and the replacement policy is asked only when the set is full. A dirty line being
    /// replaced is written back before the new block is read. The policy sees a refill
    /// as a hit and a fresh install as a fill.
    ///
    /// Afterwards every address in the block hits.
    pub fn fill(&mut self, addr: u16, memory: &mut BackingStore) -> FillOutcome {
        let geometry = *self.geometry();
        let fields = geometry.decode(addr);
        let range = geometry.block_range(addr);

        let set = self.cache.set(fields.index);
        let (way, refill) = set.find(fields.tag).map_or_else(
            || {
                let way = set.first_invalid().unwrap_or_else(|| {
                    let victim = self.policy.get_victim(fields.index);
                    debug_assert!(victim < geometry.ways(), "policy chose way {victim}");
                    victim % geometry.ways()
                });
                (way, false)
            },
            |way| (way, true),
        );

        let line = self.cache.line(fields.index, way);
        let resident = line.is_valid().then(|| {
            geometry.compose(AddrFields {
                tag: line.tag(),
                index: fields.index,
                offset: 0,
            })
        });

        let wrote_back = line.is_valid() && line.is_dirty();
        if let Some(victim_start) = resident.filter(|_| wrote_back) {
            memory.write_block(victim_start, line.data());
            self.stats.writebacks += 1;
            debug!(
                block = format_args!("{victim_start:#06x}"),
                set = fields.index,
                way,
                "wrote back dirty line"
            );
        }

        let evicted = if refill { None } else { resident };
        if let Some(victim_start) = evicted {
            self.stats.evictions += 1;
            debug!(
                victim = format_args!("{victim_start:#06x}"),
                set = fields.index,
                way,
                "evicted line"
            );
        }

        self.cache
            .line_mut(fields.index, way)
            .install(fields.tag, memory.block(range));
        // A refill keeps the block's place in the insertion order.
        if refill {
            self.policy.update(fields.index, way);
        } else {
            self.policy.on_fill(fields.index, way);
        }
        self.stats.fills += 1;
        debug!(block = %range, set = fields.index, way, tag = fields.tag, "filled line");

        FillOutcome {
            way,
            evicted,
            wrote_back,
        }
    }

    /// Reads the byte at `addr`, filling its block on a miss.
    pub fn read(&mut self, addr: u16, memory: &mut BackingStore) -> u8 {
        self.access(addr, AccessKind::Read, memory).value
    }

    /// Writes `value` at `addr` (write-allocate, write-back).
    pub fn write(&mut self, addr: u16, value: u8, memory: &mut BackingStore) {
        let _ = self.access(addr, AccessKind::Write(value), memory);
    }

    /// Performs one read or write and reports what happened.
    pub fn access(
        &mut self,
        addr: u16,
        kind: AccessKind,
        memory: &mut BackingStore,
    ) -> AccessOutcome {
        let fields = self.geometry().decode(addr);

        let (hit, way, evicted) = match self.lookup(addr) {
            Lookup::Hit { way } => {
                self.policy.update(fields.index, way);
                self.stats.hits += 1;
                (true, way, None)
            }
            Lookup::Miss => {
                self.stats.misses += 1;
                let fill = self.fill(addr, memory);
                (false, fill.way, fill.evicted)
            }
        };

        let line = self.cache.line_mut(fields.index, way);
        let value = match kind {
            AccessKind::Read => {
                self.stats.reads += 1;
                line.read(fields.offset)
            }
            AccessKind::Write(value) => {
                self.stats.writes += 1;
                line.write(fields.offset, value);
                value
            }
        };

        if self.trace_accesses {
            trace!(
                addr = format_args!("{addr:#06x}"),
                %kind,
                hit,
                set = fields.index,
                way,
                value,
                "access"
            );
        }

        AccessOutcome {
            addr,
            kind,
            hit,
            way,
            value,
            evicted,
        }
    }

    /// Writes every dirty line back to `memory`, then invalidates every line.
    ///
    /// Returns the number of lines written back.
    pub fn flush(&mut self, memory: &mut BackingStore) -> usize {
        let geometry = *self.geometry();
        let mut written = 0;
        for (set, _way, line) in self.cache.lines_mut() {
            if line.is_valid() && line.is_dirty() {
                let start = geometry.compose(AddrFields {
                    tag: line.tag(),
                    index: set,
                    offset: 0,
                });
                memory.write_block(start, line.data());
                written += 1;
            }
            line.invalidate();
        }
        self.stats.writebacks += written as u64;
        self.policy.reset();
        debug!(written, "flushed cache");
        written
    }

    /// Returns every line, the policy and the statistics to their power-on state.
    pub fn reset(&mut self) {
        self.cache.reset();
        self.policy.reset();
        self.stats = CacheStats::default();
    }
}
