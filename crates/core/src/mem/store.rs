//! Flat backing store.
//!
//! The system of record for all data not currently cached: a dense array of
//! `u64` cells indexed by address in `[0, capacity)`. Reads and writes are
//! bounds-validated and fail with `OutOfRange` outside that window. The store
//! imposes no alignment requirement; line alignment is the cache's job.

use crate::common::error::SimError;

/// Flat, bounds-checked backing memory.
pub struct BackingStore {
    cells: Vec<u64>,
}

impl BackingStore {
    /// Creates a store of `capacity` cells, all zero.
    pub fn new(capacity: u64) -> Self {
        Self {
            cells: vec![0; capacity as usize],
        }
    }

    /// Returns the capacity in cells.
    pub fn capacity(&self) -> u64 {
        self.cells.len() as u64
    }

    /// Reads the cell at `addr`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::OutOfRange`] when `addr >= capacity`.
    pub fn read(&self, addr: u64) -> Result<u64, SimError> {
        self.cells
            .get(addr as usize)
            .copied()
            .ok_or(SimError::OutOfRange {
                addr,
                capacity: self.capacity(),
            })
    }

    /// Writes `value` to the cell at `addr`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::OutOfRange`] when `addr >= capacity`.
    pub fn write(&mut self, addr: u64, value: u64) -> Result<(), SimError> {
        let capacity = self.capacity();
        match self.cells.get_mut(addr as usize) {
            Some(cell) => {
                *cell = value;
                Ok(())
            }
            None => Err(SimError::OutOfRange { addr, capacity }),
        }
    }

    /// Zeroes every cell.
    pub fn reset(&mut self) {
        self.cells.fill(0);
    }
}
