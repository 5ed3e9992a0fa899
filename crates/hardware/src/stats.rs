//! Cache statistics collection and reporting.
//!
//! This module tracks the access metrics of the simulated cache. It provides:
//! 1. **Access mix:** Reads and writes issued through the controller.
//! 2. **Outcomes:** Hits, misses and the derived hit/miss rates.
//! 3. **Line traffic:** Fills, evictions of valid lines, and dirty write-backs.
//!
//! Residency checks (`is_hit`) never touch these counters.

use std::fmt;

/// Cache statistics structure tracking all access metrics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Read accesses issued.
    pub reads: u64,
    /// Write accesses issued.
    pub writes: u64,
    /// Accesses that found their block resident.
    pub hits: u64,
    /// Accesses that had to fill their block.
    pub misses: u64,
    /// Blocks read from the backing store into a line.
    pub fills: u64,
    /// Fills that displaced a valid line.
    pub evictions: u64,
    /// Dirty lines written back to the backing store.
    pub writebacks: u64,
}

impl CacheStats {
    /// Total accesses (hits plus misses).
    pub const fn accesses(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of accesses that hit, `0.0` when nothing was accessed.
    pub const fn hit_rate(&self) -> f64 {
        let total = self.accesses();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Fraction of accesses that missed, `0.0` when nothing was accessed.
    pub const fn miss_rate(&self) -> f64 {
        let total = self.accesses();
        if total == 0 {
            0.0
        } else {
            self.misses as f64 / total as f64
        }
    }

    /// Prints the report to stdout.
    pub fn print(&self) {
        println!("{self}");
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "==========================================================")?;
        writeln!(f, "CACHE SIMULATION STATISTICS")?;
        writeln!(f, "==========================================================")?;
        writeln!(f, "accesses                 {}", self.accesses())?;
        writeln!(f, "  reads                  {}", self.reads)?;
        writeln!(f, "  writes                 {}", self.writes)?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(
            f,
            "hits                     {} ({:.2}%)",
            self.hits,
            self.hit_rate() * 100.0
        )?;
        writeln!(
            f,
            "misses                   {} ({:.2}%)",
            self.misses,
            self.miss_rate() * 100.0
        )?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "fills                    {}", self.fills)?;
        writeln!(f, "evictions                {}", self.evictions)?;
        writeln!(f, "writebacks               {}", self.writebacks)?;
        write!(f, "==========================================================")
    }
}
