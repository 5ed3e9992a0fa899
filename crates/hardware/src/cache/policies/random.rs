//! Random Replacement Policy.
//!
//! This policy evicts a pseudo-random way from the set. It uses a xorshift
//! generator with a fixed seed, so a replay from reset picks the same victims.

use super::ReplacementPolicy;

const SEED: u64 = 123_456_789;

/// Random Policy state.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    /// Number of ways in the cache.
    ways: usize,
    /// Internal state for the pseudo-random number generator.
    state: u64,
}

impl RandomPolicy {
    /// Creates a new Random policy instance.
    ///
    /// # Arguments
    ///
    /// * `sets` - The number of sets (unused in this policy but required by interface).
    /// * `ways` - The associativity (number of ways) of the cache.
    pub const fn new(_sets: usize, ways: usize) -> Self {
        Self { ways, state: SEED }
    }
}

impl ReplacementPolicy for RandomPolicy {
    /// Access patterns do not affect the state.
    fn update(&mut self, _set: usize, _way: usize) {}

    /// Advances the generator and maps it to a valid way index.
    fn get_victim(&mut self, _set: usize) -> usize {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        (x % self.ways as u64) as usize
    }

    fn reset(&mut self) {
        self.state = SEED;
    }
}
