//! Least Recently Used (LRU) replacement policy.
//!
//! Evicts the way that has gone longest without an access. Each set keeps a
//! recency stack: the front is the most recently used way, the back the least.
//! Every hit or fill moves the touched way to the front.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `on_hit()` / `on_fill()`: O(W) where W is the associativity
//!   - `victim()`: O(1)
//! - **Space Complexity:** O(S × W) where S is the number of sets
//! - **Best Case:** Workloads with strong temporal locality
//! - **Worst Case:** Scanning patterns larger than the set (thrashing)

use super::ReplacementPolicy;

/// LRU policy state.
pub struct LruPolicy {
    /// One recency stack per set; front is MRU, back is LRU.
    ///
    /// Stacks start empty and grow as ways are filled, so `victim()` on a set
    /// that was never full falls back to way 0.
    recency: Vec<Vec<usize>>,
}

impl LruPolicy {
    /// Creates an LRU policy for `sets` sets of `ways` ways each.
    pub fn new(sets: usize, ways: usize) -> Self {
        Self {
            recency: (0..sets).map(|_| Vec::with_capacity(ways)).collect(),
        }
    }

    /// Moves `way` to the MRU position of its set's stack.
    fn promote(&mut self, set: usize, way: usize) {
        let stack = &mut self.recency[set];
        if let Some(pos) = stack.iter().position(|&w| w == way) {
            stack.remove(pos);
        }
        stack.insert(0, way);
    }
}

impl ReplacementPolicy for LruPolicy {
    fn on_hit(&mut self, set: usize, way: usize) {
        self.promote(set, way);
    }

    fn on_fill(&mut self, set: usize, way: usize) {
        self.promote(set, way);
    }

    /// Returns the way at the back of the recency stack (least recent).
    ///
    /// Recency is strictly ordered, so ties cannot occur; an empty stack
    /// falls back to way 0.
    fn victim(&mut self, set: usize) -> usize {
        self.recency[set].last().copied().unwrap_or(0)
    }

    fn reset(&mut self) {
        for stack in &mut self.recency {
            stack.clear();
        }
    }
}
