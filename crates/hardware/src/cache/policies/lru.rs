//! Least Recently Used (LRU) Replacement Policy.
//!
//! This policy evicts the line that has not been accessed for the longest time.
//! It maintains a usage stack for each set. When a line is accessed or filled, it is
//! moved to the top (Most Recently Used position). The bottom of the stack represents
//! the Least Recently Used line.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `update()`: O(W) where W is the number of ways (associativity)
//!   - `get_victim()`: O(1)
//! - **Space Complexity:** O(S × W) where S is the number of sets
//! - **Best Case:** Working sets that fit in the associativity
//! - **Worst Case:** Cyclic scans one block larger than a set (thrashing)

use super::ReplacementPolicy;

/// LRU Policy state.
#[derive(Debug, Clone)]
pub struct LruPolicy {
    /// A vector of usage stacks (one per set).
    /// Index 0 is MRU, last index is LRU.
    usage: Vec<Vec<usize>>,
    /// Number of ways in the cache.
    ways: usize,
}

impl LruPolicy {
    /// Creates a new LRU policy instance.
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

/// Moves `way` to the MRU end (index 0) of a usage stack.
pub(super) fn promote(stack: &mut Vec<usize>, way: usize) {
    if let Some(pos) = stack.iter().position(|&x| x == way) {
        let _ = stack.remove(pos);
    }
    stack.insert(0, way);
}

impl ReplacementPolicy for LruPolicy {
    /// Moves the accessed `way` to the front of the usage stack (MRU position),
    /// shifting other elements down.
    fn update(&mut self, set: usize, way: usize) {
        promote(&mut self.usage[set], way);
    }

    /// Returns the way at the bottom of the usage stack (LRU position).
    fn get_victim(&mut self, set: usize) -> usize {
        self.usage[set].last().copied().unwrap_or(0)
    }

    fn reset(&mut self) {
        for stack in &mut self.usage {
            stack.clear();
            stack.extend(0..self.ways);
        }
    }
}
