//! Cache Replacement Policies.
//!
//! Implements the algorithms that select a victim way when a block must be installed
//! in a set whose ways are all valid. The controller only consults a policy after it
//! has failed to find an invalid way, so policies never have to reason about validity.
//!
//! # Policies
//!
//! - `Fifo`: Round-robin per set.
//! - `Lru`: Least Recently Used.
//! - `Mru`: Most Recently Used.
//! - `Plru`: Pseudo-LRU (one MRU bit per way).
//! - `Random`: Fixed-seed xorshift.
//!
//! Every policy is deterministic: replaying the same access sequence after
//! [`ReplacementPolicy::reset`] selects the same victims.

/// First-In, First-Out replacement policy.
pub mod fifo;

/// Least Recently Used replacement policy.
pub mod lru;

/// Most Recently Used replacement policy.
pub mod mru;

/// Pseudo-LRU (MRU-bit) replacement policy.
pub mod plru;

/// Random replacement policy.
pub mod random;

use std::fmt;

pub use fifo::FifoPolicy;
pub use lru::LruPolicy;
pub use mru::MruPolicy;
pub use plru::PlruPolicy;
pub use random::RandomPolicy;

use crate::config::ReplacementPolicy as PolicyType;

/// Trait for cache replacement policies.
///
/// Defines the interface for updating usage state and selecting victim lines.
pub trait ReplacementPolicy: Send + Sync + fmt::Debug {
    /// Updates the policy state when a resident line is hit.
    ///
    /// # Arguments
    ///
    /// * `set` - The cache set index.
    /// * `way` - The way index within the set that was accessed.
    fn update(&mut self, set: usize, way: usize);

    /// Updates the policy state after a block was installed in `way`.
    ///
    /// Defaults to treating the fill as an access.
    fn on_fill(&mut self, set: usize, way: usize) {
        self.update(set, way);
    }

    /// Selects a victim line to evict from a specific set.
    ///
    /// # Arguments
    ///
    /// * `set` - The cache set index.
    ///
    /// # Returns
    ///
    /// The index of the way to evict, in `0..ways`.
    fn get_victim(&mut self, set: usize) -> usize;

    /// Restores the power-on state.
    fn reset(&mut self);
}

/// Builds the policy selected by configuration for a `sets` x `ways` cache.
pub fn build(kind: PolicyType, sets: usize, ways: usize) -> Box<dyn ReplacementPolicy> {
    match kind {
        PolicyType::Fifo => Box::new(FifoPolicy::new(sets, ways)),
        PolicyType::Random => Box::new(RandomPolicy::new(sets, ways)),
        PolicyType::Plru => Box::new(PlruPolicy::new(sets, ways)),
        PolicyType::Lru => Box::new(LruPolicy::new(sets, ways)),
        PolicyType::Mru => Box::new(MruPolicy::new(sets, ways)),
    }
}
