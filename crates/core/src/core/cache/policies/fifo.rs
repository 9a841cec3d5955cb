//! First-In, First-Out (FIFO) replacement policy.
//!
//! Evicts the way that was filled longest ago, regardless of how recently it
//! was hit. Each set keeps an insertion-order queue; hits never reorder it,
//! which is what distinguishes FIFO from LRU under re-referencing workloads.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `on_fill()`: O(W) where W is the associativity
//!   - `victim()`: O(1)
//! - **Space Complexity:** O(S × W) where S is the number of sets

use super::ReplacementPolicy;

/// FIFO policy state.
pub struct FifoPolicy {
    /// One insertion-order queue per set; front is the oldest fill.
    order: Vec<Vec<usize>>,
}

impl FifoPolicy {
    /// Creates a FIFO policy for `sets` sets of `ways` ways each.
    pub fn new(sets: usize, ways: usize) -> Self {
        Self {
            order: (0..sets).map(|_| Vec::with_capacity(ways)).collect(),
        }
    }
}

impl ReplacementPolicy for FifoPolicy {
    /// Hits do not affect insertion order.
    fn on_hit(&mut self, _set: usize, _way: usize) {}

    /// Moves `way` to the back of the queue (newest fill).
    ///
    /// A refilled victim way re-enters at the back, so the queue always
    /// reflects fill order even after evictions.
    fn on_fill(&mut self, set: usize, way: usize) {
        let queue = &mut self.order[set];
        queue.retain(|&w| w != way);
        queue.push(way);
    }

    /// Returns the way at the front of the queue (oldest fill).
    ///
    /// Insertion order is strictly maintained, so ties cannot occur; an empty
    /// queue falls back to way 0.
    fn victim(&mut self, set: usize) -> usize {
        self.order[set].first().copied().unwrap_or(0)
    }

    fn reset(&mut self) {
        for queue in &mut self.order {
            queue.clear();
        }
    }
}
