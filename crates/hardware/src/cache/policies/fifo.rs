//! First-In, First-Out (FIFO) Replacement Policy.
//!
//! This policy evicts the oldest block in a set, regardless of how recently
//! it was accessed. It operates as a round-robin pointer per set: every fill
//! moves the pointer to the way after the one just filled.
//!
//! # Performance
//!
//! - **Time Complexity:** O(1) for `on_fill()` and `get_victim()`; hits are free.
//! - **Space Complexity:** O(S) where S is the number of sets
//! - **Best Case:** Streaming accesses where all lines have equal importance
//! - **Worst Case:** Workloads with strong temporal locality

use super::ReplacementPolicy;

/// FIFO Policy state.
#[derive(Debug, Clone)]
pub struct FifoPolicy {
    /// Tracks the next way to be evicted for each set.
    next_way: Vec<usize>,
    /// Number of ways in the cache.
    ways: usize,
}

impl FifoPolicy {
    /// Creates a new FIFO policy instance.
    ///
    /// # Arguments
    ///
    /// * `sets` - The number of sets in the cache.
    /// * `ways` - The associativity (number of ways) of the cache.
    pub fn new(sets: usize, ways: usize) -> Self {
        Self {
            next_way: vec![0; sets],
            ways,
        }
    }
}

impl ReplacementPolicy for FifoPolicy {
    /// Hits do not change insertion order.
    fn update(&mut self, _set: usize, _way: usize) {}

    /// Points the set's cursor just past the way that was filled.
    fn on_fill(&mut self, set: usize, way: usize) {
        self.next_way[set] = (way + 1) % self.ways;
    }

    /// Returns the current round-robin pointer for the specified set.
    fn get_victim(&mut self, set: usize) -> usize {
        self.next_way[set]
    }

    fn reset(&mut self) {
        self.next_way.fill(0);
    }
}
