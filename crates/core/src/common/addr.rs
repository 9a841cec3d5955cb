//! Address geometry and translation.
//!
//! This module implements the pure block/set/tag decomposition used by the
//! cache engine. Given a configured line size and set count:
//!
//! ```text
//! block_addr = address / line_size
//! set_index  = block_addr % num_sets
//! tag        = block_addr / num_sets
//! base_addr  = block_addr * line_size
//! ```
//!
//! Translation is deterministic and has no side effects; two addresses with
//! the same block address always map to the same `(set_index, tag)` pair.

use crate::common::error::SimError;

/// The decomposed parts of an address under a given [`Geometry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddrParts {
    /// The block (line) number the address falls into.
    pub block_addr: u64,
    /// Which set the block maps to.
    pub set_index: usize,
    /// The tag distinguishing this block from others mapping to the same set.
    pub tag: u64,
    /// The first address of the block (line-aligned).
    pub base_addr: u64,
}

/// Fixed address geometry: line size and set count.
///
/// Validated once at construction; after that, [`Geometry::split`] cannot fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    line_size: u64,
    num_sets: u64,
}

impl Geometry {
    /// Creates a geometry from a line size and set count.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfiguration`] if `line_size` or `num_sets`
    /// is zero.
    pub fn new(line_size: u64, num_sets: u64) -> Result<Self, SimError> {
        if line_size == 0 {
            return Err(SimError::InvalidConfiguration(
                "line_size must be a positive integer".into(),
            ));
        }
        if num_sets == 0 {
            return Err(SimError::InvalidConfiguration(
                "num_sets must be a positive integer".into(),
            ));
        }
        Ok(Self {
            line_size,
            num_sets,
        })
    }

    /// Returns the configured line size.
    #[inline]
    pub fn line_size(&self) -> u64 {
        self.line_size
    }

    /// Returns the configured number of sets.
    #[inline]
    pub fn num_sets(&self) -> u64 {
        self.num_sets
    }

    /// Decomposes an address into block, set, tag, and base address.
    #[inline]
    pub fn split(&self, addr: u64) -> AddrParts {
        let block_addr = addr / self.line_size;
        AddrParts {
            block_addr,
            set_index: (block_addr % self.num_sets) as usize,
            tag: block_addr / self.num_sets,
            base_addr: block_addr * self.line_size,
        }
    }

    /// Reconstructs the base address of the block identified by `(tag, set_index)`.
    ///
    /// Inverse of [`Geometry::split`] for line-aligned addresses; used to find
    /// where an evicted line's data belongs in the backing store.
    #[inline]
    pub fn base_of(&self, tag: u64, set_index: usize) -> u64 {
        (tag * self.num_sets + set_index as u64) * self.line_size
    }
}
