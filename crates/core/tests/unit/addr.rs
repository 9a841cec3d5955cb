//! Address translation unit tests.
//!
//! Verifies the pure block/set/tag decomposition: worked examples with a
//! known geometry, the round-trip property over arbitrary addresses, and
//! construction-time rejection of a zero line size.

use cachesim_core::common::{Geometry, SimError};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// Geometry: 4-cell lines, 4 sets.
///
/// addr 0x12: block = 0x12 / 4 = 4, set = 4 % 4 = 0, tag = 4 / 4 = 1,
/// base = 4 * 4 = 0x10.
#[test]
fn split_worked_example() {
    let g = Geometry::new(4, 4).unwrap();
    let parts = g.split(0x12);

    assert_eq!(parts.block_addr, 4);
    assert_eq!(parts.set_index, 0);
    assert_eq!(parts.tag, 1);
    assert_eq!(parts.base_addr, 0x10);
}

/// Every address of one block decomposes identically.
#[test]
fn same_block_same_set_and_tag() {
    let g = Geometry::new(8, 4).unwrap();

    let first = g.split(0x40);
    for offset in 1..8 {
        let other = g.split(0x40 + offset);
        assert_eq!(other.block_addr, first.block_addr);
        assert_eq!(other.set_index, first.set_index);
        assert_eq!(other.tag, first.tag);
        assert_eq!(other.base_addr, first.base_addr);
    }
}

/// `base_of` reconstructs the address `split` decomposed.
#[test]
fn base_of_inverts_split() {
    let g = Geometry::new(4, 8).unwrap();
    let parts = g.split(0x1234);
    assert_eq!(g.base_of(parts.tag, parts.set_index), parts.base_addr);
}

/// A zero line size is a configuration error, not a runtime state.
#[test]
fn zero_line_size_rejected() {
    assert!(matches!(
        Geometry::new(0, 4),
        Err(SimError::InvalidConfiguration(_))
    ));
}

/// A zero set count is likewise rejected at construction.
#[test]
fn zero_sets_rejected() {
    assert!(matches!(
        Geometry::new(4, 0),
        Err(SimError::InvalidConfiguration(_))
    ));
}

proptest! {
    /// Round trip for arbitrary geometry: the base address is line-aligned,
    /// re-splitting the base lands on the same (set, tag), and `base_of`
    /// inverts the decomposition.
    #[test]
    fn translation_round_trip(
        addr in 0u64..1_000_000,
        line_size in 1u64..64,
        num_sets in 1u64..32,
    ) {
        let g = Geometry::new(line_size, num_sets).unwrap();
        let parts = g.split(addr);

        prop_assert_eq!(parts.base_addr, (addr / line_size) * line_size);

        let again = g.split(parts.base_addr);
        prop_assert_eq!(again.set_index, parts.set_index);
        prop_assert_eq!(again.tag, parts.tag);

        prop_assert_eq!(g.base_of(parts.tag, parts.set_index), parts.base_addr);
    }
}
