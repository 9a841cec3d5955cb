//! Deterministic set-associative cache simulator library.
//!
//! This crate models the decision engine of a set-associative CPU cache in
//! front of a byte-addressable backing store. It provides:
//! 1. **Cache engine:** Tag/set/way lookup, replacement-policy victim selection,
//!    write-policy and write-miss-policy semantics, eviction writeback.
//! 2. **Backing store:** A flat, bounds-checked array of storage cells acting as
//!    the system of record for everything not currently cached.
//! 3. **Simulation:** A thin orchestrator that feeds address sequences into the
//!    cache and aggregates hit/miss and memory-traffic statistics.
//! 4. **Configuration:** Hierarchical config structures with serde support and
//!    construction-time validation.
//!
//! # Examples
//!
//! ```
//! use cachesim_core::config::CacheConfig;
//! use cachesim_core::core::cache::Cache;
//! use cachesim_core::mem::BackingStore;
//!
//! let mut cache = Cache::new(&CacheConfig::default()).unwrap();
//! let mut store = BackingStore::new(1024);
//!
//! let first = cache.access(&mut store, 0x10, false, None, None).unwrap();
//! let second = cache.access(&mut store, 0x10, false, None, None).unwrap();
//! assert!(!first.hit);
//! assert!(second.hit);
//! ```

/// Common types (address translation, errors).
pub mod common;
/// Simulator configuration (defaults, policy enums, hierarchical config structures).
pub mod config;
/// Cache engine (lines, lookup, replacement policies, writeback).
pub mod core;
/// Backing store (flat bounds-checked memory model).
pub mod mem;
/// Simulation orchestration (sequence stepping, scenarios, policy switching).
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `SimConfig::default()` or deserialize from JSON.
pub use crate::config::SimConfig;
/// The cache decision engine; construct with `Cache::new`.
pub use crate::core::cache::Cache;
/// Flat backing memory; the system of record behind the cache.
pub use crate::mem::BackingStore;
/// Top-level orchestrator owning the cache, store, and statistics.
pub use crate::sim::Simulator;
