//! Geometry and Address Decoder Tests.
//!
//! Verifies geometry validation and the decoding properties every address must satisfy:
//! uniform set partition, block bounds, and lossless tag/index/offset round-trip.
//! The reference geometry is swept exhaustively; other shapes are covered by
//! parameterized cases and property tests.

use memsim_core::cache::Geometry;
use memsim_core::common::{ADDRESS_SPACE, AddrFields, ConfigError};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

// ══════════════════════════════════════════════════════════
// 1. Exhaustive properties on the reference geometry
// ══════════════════════════════════════════════════════════

/// 65536 addresses over 16 sets → exactly 4096 per set.
#[test]
fn set_index_partition_is_uniform() {
    let g = Geometry::default();
    let mut per_set = [0usize; 16];
    for addr in 0..=u16::MAX {
        let index = g.set_index(addr);
        assert!(index < g.num_sets());
        per_set[index] += 1;
    }
    assert_eq!(per_set, [4096; 16]);
    assert_eq!(per_set.iter().sum::<usize>(), ADDRESS_SPACE);
}

#[test]
fn block_end_minus_start_is_block_size_minus_one() {
    let g = Geometry::default();
    for addr in 0..=u16::MAX {
        assert_eq!(g.block_end(addr) - g.block_start(addr), 63, "addr {addr:#06x}");
    }
}

#[test]
fn decode_compose_round_trips_every_address() {
    let g = Geometry::default();
    for addr in 0..=u16::MAX {
        let fields = g.decode(addr);
        assert!(fields.tag < 64);
        assert!(fields.offset < 64);
        assert_eq!(g.compose(fields), addr);
        // Same thing spelled out with shifts.
        let manual = ((fields.tag as u32) << 10) | ((fields.index as u32) << 6) | fields.offset as u32;
        assert_eq!(manual as u16, addr);
    }
}

/// Fixed reference points from the 6/4/6 layout.
#[rstest]
#[case(0x0000, 0x00, 0, 0, 0x0000, 0x003F)]
#[case(0x003F, 0x00, 0, 63, 0x0000, 0x003F)]
#[case(0x0040, 0x00, 1, 0, 0x0040, 0x007F)]
#[case(0x03FF, 0x00, 15, 63, 0x03C0, 0x03FF)]
#[case(0x0400, 0x01, 0, 0, 0x0400, 0x043F)]
#[case(0xBABE, 0x2E, 10, 62, 0xBA80, 0xBABF)]
#[case(0xCAFE, 0x32, 11, 62, 0xCAC0, 0xCAFF)]
#[case(0xFFFF, 0x3F, 15, 63, 0xFFC0, 0xFFFF)]
fn decode_reference_points(
    #[case] addr: u16,
    #[case] tag: u16,
    #[case] index: usize,
    #[case] offset: usize,
    #[case] start: u16,
    #[case] end: u16,
) {
    let g = Geometry::default();
    assert_eq!(g.decode(addr), AddrFields { tag, index, offset });
    assert_eq!(g.block_start(addr), start);
    assert_eq!(g.block_end(addr), end);
    assert!(g.block_range(addr).contains(addr));
}

// ══════════════════════════════════════════════════════════
// 2. Other valid shapes
// ══════════════════════════════════════════════════════════

#[rstest]
#[case::reference(6, 4, 6, 4, 4096)]
#[case::direct_mapped_full_space(0, 10, 6, 1, 65536)]
#[case::two_way_small(8, 2, 6, 2, 512)]
#[case::big_blocks(4, 4, 8, 1, 4096)]
#[case::fully_associative(10, 0, 6, 64, 4096)]
#[case::byte_blocks(12, 4, 0, 2, 32)]
fn valid_geometries_partition_uniformly(
    #[case] tag_bits: u32,
    #[case] index_bits: u32,
    #[case] offset_bits: u32,
    #[case] ways: usize,
    #[case] size: usize,
) {
    let g = Geometry::new(tag_bits, index_bits, offset_bits, ways, size).unwrap();
    assert_eq!(g.num_sets() * g.ways() * g.block_size(), g.size_bytes());

    let mut per_set = vec![0usize; g.num_sets()];
    for addr in 0..=u16::MAX {
        per_set[g.set_index(addr)] += 1;
        assert_eq!(g.compose(g.decode(addr)), addr);
        assert_eq!(
            usize::from(g.block_end(addr) - g.block_start(addr)),
            g.block_size() - 1
        );
    }
    let expected = ADDRESS_SPACE / g.num_sets();
    assert!(per_set.iter().all(|&n| n == expected));
}

// ══════════════════════════════════════════════════════════
// 3. Rejected configurations
// ══════════════════════════════════════════════════════════

#[test]
fn widths_must_cover_the_address() {
    let err = Geometry::new(6, 4, 5, 4, 2048).unwrap_err();
    assert_eq!(
        err,
        ConfigError::FieldWidthMismatch {
            tag_bits: 6,
            index_bits: 4,
            offset_bits: 5,
            address_width: 16,
        }
    );

    assert!(matches!(
        Geometry::new(8, 4, 6, 4, 4096),
        Err(ConfigError::FieldWidthMismatch { .. })
    ));
}

#[test]
fn width_overflow_is_a_mismatch_not_a_panic() {
    assert!(matches!(
        Geometry::new(u32::MAX, 1, 0, 1, 2),
        Err(ConfigError::FieldWidthMismatch { .. })
    ));
}

#[test]
fn zero_ways_rejected() {
    assert_eq!(Geometry::new(6, 4, 6, 0, 0), Err(ConfigError::ZeroWays));
}

/// A capacity product that overflows `usize` never matches, even against `usize::MAX`.
#[rstest]
#[case(0, 16, 0)]
#[case(6, 4, 6)]
fn overflowing_capacity_rejected(
    #[case] tag_bits: u32,
    #[case] index_bits: u32,
    #[case] offset_bits: u32,
) {
    let err = Geometry::new(tag_bits, index_bits, offset_bits, usize::MAX, usize::MAX).unwrap_err();
    assert!(
        matches!(
            err,
            ConfigError::SizeMismatch {
                ways: usize::MAX,
                size_bytes: usize::MAX,
                ..
            }
        ),
        "{err:?}"
    );
}

#[rstest]
#[case(4, 2048)]
#[case(4, 8192)]
#[case(2, 4096)]
fn capacity_must_match_sets_ways_blocks(#[case] ways: usize, #[case] size: usize) {
    let err = Geometry::new(6, 4, 6, ways, size).unwrap_err();
    assert_eq!(
        err,
        ConfigError::SizeMismatch {
            num_sets: 16,
            ways,
            block_size: 64,
            computed: 16 * ways * 64,
            size_bytes: size,
        }
    );
}

#[test]
fn config_error_messages_name_the_numbers() {
    let err = Geometry::new(6, 4, 6, 4, 1000).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("4096"), "{msg}");
    assert!(msg.contains("1000"), "{msg}");
}

// ══════════════════════════════════════════════════════════
// 4. Property tests over arbitrary addresses
// ══════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn fields_stay_in_range(addr in any::<u16>()) {
        let g = Geometry::default();
        let f = g.decode(addr);
        prop_assert!((f.tag as usize) < g.num_tags());
        prop_assert!(f.index < g.num_sets());
        prop_assert!(f.offset < g.block_size());
    }

    #[test]
    fn block_start_is_aligned_and_contains_addr(addr in any::<u16>()) {
        let g = Geometry::default();
        let range = g.block_range(addr);
        prop_assert_eq!(range.start as usize % g.block_size(), 0);
        prop_assert!(range.contains(addr));
        prop_assert_eq!(range.len(), g.block_size());
        prop_assert_eq!(usize::from(addr - range.start), g.offset(addr));
    }

    #[test]
    fn same_block_shares_tag_and_index(addr in any::<u16>(), delta in 0usize..64) {
        let g = Geometry::default();
        let other = g.block_start(addr) + delta as u16;
        prop_assert_eq!(g.tag(other), g.tag(addr));
        prop_assert_eq!(g.set_index(other), g.set_index(addr));
    }
}
