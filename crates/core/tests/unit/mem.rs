//! Backing store unit tests.
//!
//! Verifies the bounds contract: any address in `[0, capacity)` succeeds,
//! anything at or past capacity fails with `OutOfRange`, and nothing else
//! ever fails.

use cachesim_core::common::SimError;
use cachesim_core::mem::BackingStore;
use pretty_assertions::assert_eq;

#[test]
fn untouched_cells_read_zero() {
    let store = BackingStore::new(16);
    assert_eq!(store.read(0).unwrap(), 0);
    assert_eq!(store.read(15).unwrap(), 0);
}

#[test]
fn write_then_read_round_trips() {
    let mut store = BackingStore::new(16);
    store.write(7, 0xDEAD_BEEF).unwrap();
    assert_eq!(store.read(7).unwrap(), 0xDEAD_BEEF);
}

/// Every in-range address succeeds; the first out-of-range address fails.
#[test]
fn bounds_are_exact() {
    let mut store = BackingStore::new(8);

    for addr in 0..8 {
        assert!(store.read(addr).is_ok());
        assert!(store.write(addr, addr).is_ok());
    }

    assert_eq!(
        store.read(8),
        Err(SimError::OutOfRange {
            addr: 8,
            capacity: 8
        })
    );
    assert_eq!(
        store.write(8, 1),
        Err(SimError::OutOfRange {
            addr: 8,
            capacity: 8
        })
    );
}

#[test]
fn far_out_of_range_reports_address() {
    let store = BackingStore::new(4);
    assert_eq!(
        store.read(u64::MAX),
        Err(SimError::OutOfRange {
            addr: u64::MAX,
            capacity: 4
        })
    );
}

#[test]
fn reset_zeroes_all_cells() {
    let mut store = BackingStore::new(4);
    store.write(0, 1).unwrap();
    store.write(3, 9).unwrap();

    store.reset();

    for addr in 0..4 {
        assert_eq!(store.read(addr).unwrap(), 0);
    }
}

#[test]
fn capacity_reports_cell_count() {
    assert_eq!(BackingStore::new(1024).capacity(), 1024);
}
