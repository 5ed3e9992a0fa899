//! Cache Replacement Policy Tests.
//!
//! Verifies the victim selection logic for LRU, FIFO, PLRU, MRU, and Random policies.
//! Each policy implements `ReplacementPolicy` with `update(set, way)` (hit),
//! `on_fill(set, way)`, `get_victim(set)` and `reset()`. Most tests exercise them in
//! isolation; the last section drives them through a system to check which events
//! the controller reports.

use memsim_core::cache::policies::{
    self, FifoPolicy, LruPolicy, MruPolicy, PlruPolicy, RandomPolicy, ReplacementPolicy,
};
use memsim_core::config::ReplacementPolicy as PolicyType;
use rstest::rstest;

use crate::common::harness::TestContext;

// ══════════════════════════════════════════════════════════
// 1. LRU Policy
// ══════════════════════════════════════════════════════════

/// Initial stack is [0, 1, 2, 3] with index 0 = MRU, so the victim is 3.
#[test]
fn lru_initial_victim_is_last_way() {
    let mut policy = LruPolicy::new(1, 4);
    assert_eq!(policy.get_victim(0), 3);
}

/// Accessing ways in order 0,1,2,3 makes 0 the LRU.
#[test]
fn lru_sequential_access_reorders() {
    let mut policy = LruPolicy::new(1, 4);
    for way in 0..4 {
        policy.update(0, way);
    }
    assert_eq!(policy.get_victim(0), 0);
}

/// Access 0,1,2,3 then re-access 0 → LRU becomes 1.
#[test]
fn lru_evicts_true_lru_after_reaccess() {
    let mut policy = LruPolicy::new(1, 4);
    for way in 0..4 {
        policy.on_fill(0, way);
    }
    assert_eq!(policy.get_victim(0), 0);

    policy.update(0, 0);
    // Stack: [0, 3, 2, 1].
    assert_eq!(policy.get_victim(0), 1);

    policy.update(0, 1);
    // Stack: [1, 0, 3, 2].
    assert_eq!(policy.get_victim(0), 2);
}

/// LRU operates independently across sets.
#[test]
fn lru_independent_sets() {
    let mut policy = LruPolicy::new(2, 4);
    for way in 0..4 {
        policy.update(0, way);
    }
    assert_eq!(policy.get_victim(0), 0);
    assert_eq!(policy.get_victim(1), 3);
}

#[test]
fn lru_reset_restores_initial_order() {
    let mut policy = LruPolicy::new(1, 4);
    policy.update(0, 3);
    policy.update(0, 2);
    policy.reset();
    assert_eq!(policy.get_victim(0), 3);
}

// ══════════════════════════════════════════════════════════
// 2. FIFO Policy
// ══════════════════════════════════════════════════════════

/// Fills advance the cursor round-robin; hits leave it alone.
#[test]
fn fifo_round_robin_on_fill() {
    let mut policy = FifoPolicy::new(1, 4);
    assert_eq!(policy.get_victim(0), 0);

    for way in 0..4 {
        policy.on_fill(0, way);
    }
    assert_eq!(policy.get_victim(0), 0);

    // Hits do not reorder.
    policy.update(0, 0);
    policy.update(0, 0);
    assert_eq!(policy.get_victim(0), 0);

    policy.on_fill(0, 0);
    assert_eq!(policy.get_victim(0), 1);
    policy.on_fill(0, 1);
    assert_eq!(policy.get_victim(0), 2);
}

#[test]
fn fifo_cursor_wraps_after_last_way() {
    let mut policy = FifoPolicy::new(2, 4);
    policy.on_fill(1, 3);
    assert_eq!(policy.get_victim(1), 0);
    assert_eq!(policy.get_victim(0), 0);
}

#[test]
fn fifo_reset_rewinds_every_set() {
    let mut policy = FifoPolicy::new(2, 4);
    policy.on_fill(0, 1);
    policy.on_fill(1, 2);
    policy.reset();
    assert_eq!(policy.get_victim(0), 0);
    assert_eq!(policy.get_victim(1), 0);
}

// ══════════════════════════════════════════════════════════
// 3. PLRU Policy
// ══════════════════════════════════════════════════════════

#[test]
fn plru_victim_is_lowest_clear_bit() {
    let mut policy = PlruPolicy::new(1, 4);
    assert_eq!(policy.get_victim(0), 0);

    policy.update(0, 0);
    policy.update(0, 1);
    policy.update(0, 2);
    assert_eq!(policy.get_victim(0), 3);
}

/// Setting the last clear bit clears all others.
#[test]
fn plru_saturation_keeps_only_latest() {
    let mut policy = PlruPolicy::new(1, 4);
    for way in 0..4 {
        policy.update(0, way);
    }
    // Bits: [0, 0, 0, 1].
    assert_eq!(policy.get_victim(0), 0);
    policy.update(0, 0);
    assert_eq!(policy.get_victim(0), 1);
}

/// Bit-PLRU is not limited to 64 ways.
#[test]
fn plru_supports_wide_sets() {
    let mut policy = PlruPolicy::new(1, 128);
    for way in 0..100 {
        policy.update(0, way);
    }
    assert_eq!(policy.get_victim(0), 100);
}

// ══════════════════════════════════════════════════════════
// 4. MRU Policy
// ══════════════════════════════════════════════════════════

#[test]
fn mru_evicts_most_recent() {
    let mut policy = MruPolicy::new(1, 4);
    assert_eq!(policy.get_victim(0), 0);

    policy.update(0, 2);
    assert_eq!(policy.get_victim(0), 2);

    policy.on_fill(0, 3);
    assert_eq!(policy.get_victim(0), 3);
}

// ══════════════════════════════════════════════════════════
// 5. Random Policy
// ══════════════════════════════════════════════════════════

#[test]
fn random_is_deterministic_and_in_range() {
    let mut a = RandomPolicy::new(16, 4);
    let mut b = RandomPolicy::new(16, 4);
    let seq_a: Vec<usize> = (0..256).map(|i| a.get_victim(i % 16)).collect();
    let seq_b: Vec<usize> = (0..256).map(|i| b.get_victim(i % 16)).collect();
    assert_eq!(seq_a, seq_b);
    assert!(seq_a.iter().all(|&w| w < 4));
    // Not stuck on one way.
    assert!((0..4).all(|w| seq_a.contains(&w)));
}

#[test]
fn random_reset_replays_sequence() {
    let mut policy = RandomPolicy::new(1, 8);
    let first: Vec<usize> = (0..32).map(|_| policy.get_victim(0)).collect();
    policy.reset();
    let second: Vec<usize> = (0..32).map(|_| policy.get_victim(0)).collect();
    assert_eq!(first, second);
}

// ══════════════════════════════════════════════════════════
// 6. Cross-policy contract
// ══════════════════════════════════════════════════════════

/// Every policy returns a way inside the set, before and after traffic.
#[rstest]
#[case(PolicyType::Lru)]
#[case(PolicyType::Fifo)]
#[case(PolicyType::Plru)]
#[case(PolicyType::Mru)]
#[case(PolicyType::Random)]
fn victim_always_in_range(#[case] kind: PolicyType) {
    let (sets, ways) = (4, 3);
    let mut policy = policies::build(kind, sets, ways);
    for step in 0..200 {
        let set = step % sets;
        let victim = policy.get_victim(set);
        assert!(victim < ways, "{kind:?} picked {victim}");
        if step % 3 == 0 {
            policy.update(set, step % ways);
        } else {
            policy.on_fill(set, victim);
        }
    }
}

/// A single-way set can only ever evict way 0.
#[rstest]
#[case(PolicyType::Lru)]
#[case(PolicyType::Fifo)]
#[case(PolicyType::Plru)]
#[case(PolicyType::Mru)]
#[case(PolicyType::Random)]
fn direct_mapped_victim_is_way_zero(#[case] kind: PolicyType) {
    let mut policy = policies::build(kind, 8, 1);
    for set in 0..8 {
        policy.on_fill(set, 0);
        assert_eq!(policy.get_victim(set), 0);
    }
}

// ══════════════════════════════════════════════════════════
// 7. Policies behind the controller
// ══════════════════════════════════════════════════════════

/// Refilling a resident block must not move the FIFO cursor.
#[test]
fn fifo_refill_keeps_insertion_order() {
    let mut ctx = TestContext::with_policy(PolicyType::Fifo);
    for tag in 0..4u16 {
        let _ = ctx.system.fill(ctx.addr(tag, 0, 0));
    }

    let refill = ctx.system.fill(ctx.addr(1, 0, 0));
    assert_eq!(refill.way, 1);
    assert_eq!(refill.evicted, None);

    let fill = ctx.system.fill(ctx.addr(4, 0, 0));
    assert_eq!(fill.evicted, Some(ctx.addr(0, 0, 0)));
    assert_eq!(fill.way, 0);

    // The cursor then continues past the oldest survivor.
    let fill = ctx.system.fill(ctx.addr(5, 0, 0));
    assert_eq!(fill.evicted, Some(ctx.addr(1, 0, 0)));
}

/// Under LRU a refill counts as a use, so the refilled block is not the next victim.
#[test]
fn lru_refill_counts_as_use() {
    let mut ctx = TestContext::with_policy(PolicyType::Lru);
    for tag in 0..4u16 {
        let _ = ctx.system.fill(ctx.addr(tag, 2, 0));
    }
    let _ = ctx.system.fill(ctx.addr(0, 2, 0));

    let fill = ctx.system.fill(ctx.addr(4, 2, 0));
    assert_eq!(fill.evicted, Some(ctx.addr(1, 2, 0)));
}
