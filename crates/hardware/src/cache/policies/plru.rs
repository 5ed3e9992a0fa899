//! Pseudo-LRU (PLRU) Replacement Policy.
//!
//! Bit-PLRU approximates Least Recently Used with a single MRU bit per way.
//! An access sets the way's bit; once every bit in the set is set, all bits
//! except the one just accessed are cleared. The victim is the lowest way
//! whose bit is clear.
//!
//! # Performance
//!
//! - **Time Complexity:** O(W) for `update()` and `get_victim()`
//! - **Space Complexity:** O(S × W) bits where S is sets, W is ways
//! - **Best Case:** Similar to LRU for most access patterns
//! - **Worst Case:** Pathological cases can cause premature eviction of useful lines

use super::ReplacementPolicy;

/// PLRU Policy state.
#[derive(Debug, Clone)]
pub struct PlruPolicy {
    /// MRU bits, `ways` per set, flattened.
    mru: Vec<bool>,
    /// Number of ways in the cache.
    ways: usize,
}

impl PlruPolicy {
    /// Creates a new PLRU policy instance.
    ///
    /// # Arguments
    ///
    /// * `sets` - The number of sets in the cache.
    /// * `ways` - The associativity (number of ways) of the cache.
    pub fn new(sets: usize, ways: usize) -> Self {
        Self {
            mru: vec![false; sets * ways],
            ways,
        }
    }

    fn bits_mut(&mut self, set: usize) -> &mut [bool] {
        let base = set * self.ways;
        &mut self.mru[base..base + self.ways]
    }
}

impl ReplacementPolicy for PlruPolicy {
    /// Sets the accessed way's bit, protecting it from immediate eviction.
    fn update(&mut self, set: usize, way: usize) {
        let bits = self.bits_mut(set);
        bits[way] = true;
        if bits.iter().all(|&b| b) {
            bits.fill(false);
            bits[way] = true;
        }
    }

    /// Returns the lowest way whose MRU bit is clear.
    fn get_victim(&mut self, set: usize) -> usize {
        self.bits_mut(set).iter().position(|&b| !b).unwrap_or(0)
    }

    fn reset(&mut self) {
        self.mru.fill(false);
    }
}
