//! Simulation statistics collection and reporting.
//!
//! Tracks the raw counters a simulation run accumulates:
//! 1. **Accesses:** Total accesses, hits, and misses, with derived rates.
//! 2. **Memory traffic:** Backing-store reads and writes, taken from the
//!    per-access event flags the cache emits.
//!
//! The struct serializes with `serde` for machine-readable export.

use serde::Serialize;

use crate::core::cache::AccessResult;

/// Counters for one simulation run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    /// Total cache accesses.
    pub accesses: u64,
    /// Accesses that hit.
    pub hits: u64,
    /// Accesses that missed.
    pub misses: u64,
    /// Backing-store reads (miss fills).
    pub memory_reads: u64,
    /// Backing-store writes (write-through, no-allocate, writebacks, flushes).
    pub memory_writes: u64,
}

impl SimStats {
    /// Creates zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the hit/miss outcome and memory traffic of one access.
    pub fn record(&mut self, result: &AccessResult) {
        self.accesses += 1;
        if result.hit {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        if result.memory_read {
            self.memory_reads += 1;
        }
        if result.memory_write {
            self.memory_writes += 1;
        }
    }

    /// Fraction of accesses that hit; 0.0 before any access.
    pub fn hit_rate(&self) -> f64 {
        if self.accesses == 0 {
            0.0
        } else {
            self.hits as f64 / self.accesses as f64
        }
    }

    /// Fraction of accesses that missed; 0.0 before any access.
    pub fn miss_rate(&self) -> f64 {
        if self.accesses == 0 {
            0.0
        } else {
            self.misses as f64 / self.accesses as f64
        }
    }

    /// Zeroes all counters.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Prints a summary report to stdout.
    pub fn print(&self) {
        println!("==========================================================");
        println!("CACHE SIMULATION STATISTICS");
        println!("==========================================================");
        println!("accesses                 {}", self.accesses);
        println!("hits                     {}", self.hits);
        println!("misses                   {}", self.misses);
        println!("hit_rate                 {:.4}", self.hit_rate());
        println!("miss_rate                {:.4}", self.miss_rate());
        println!("memory_reads             {}", self.memory_reads);
        println!("memory_writes            {}", self.memory_writes);
        println!("==========================================================");
    }
}
