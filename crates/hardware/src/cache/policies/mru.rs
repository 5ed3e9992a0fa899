//! Most Recently Used (MRU) Replacement Policy.
//!
//! This policy evicts the line that was accessed most recently.
//! While counter-intuitive for standard workloads, MRU is optimal for
//! cyclic access patterns (loops) where the dataset is larger than the cache.

use super::ReplacementPolicy;
use super::lru::promote;

/// MRU Policy state.
#[derive(Debug, Clone)]
pub struct MruPolicy {
    /// A vector of usage stacks (one per set).
    /// Index 0 is the MRU position (victim), last index is LRU.
    usage: Vec<Vec<usize>>,
    /// Number of ways in the cache.
    ways: usize,
}

impl MruPolicy {
    /// Creates a new MRU policy instance.
    ///
    /// # Arguments
    ///
    /// * `sets` - The number of sets in the cache.
    /// * `ways` - The associativity (number of ways) of the cache.
    pub fn new(sets: usize, ways: usize) -> Self {
        Self {
            usage: (0..sets).map(|_| (0..ways).collect()).collect(),
            ways,
        }
    }
}

impl ReplacementPolicy for MruPolicy {
    /// Moves the accessed `way` to the front of the usage stack (MRU position).
    fn update(&mut self, set: usize, way: usize) {
        promote(&mut self.usage[set], way);
    }

    /// Returns the way at the top of the usage stack (the Most Recently Used).
    fn get_victim(&mut self, set: usize) -> usize {
        self.usage[set].first().copied().unwrap_or(0)
    }

    fn reset(&mut self) {
        for stack in &mut self.usage {
            stack.clear();
            stack.extend(0..self.ways);
        }
    }
}
