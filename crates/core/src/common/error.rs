//! Error definitions for the cache simulator.
//!
//! Two failure kinds exist in the whole system, and neither is retried
//! internally:
//! 1. **InvalidConfiguration:** Raised at construction time (or while parsing
//!    a policy name) for bad geometry or unknown policies.
//! 2. **OutOfRange:** Raised by the backing store for addresses outside its
//!    capacity.
//!
//! Once a cache is constructed, `access` can only fail by propagating an
//! `OutOfRange` from the store; address translation itself never fails.

use thiserror::Error;

/// Errors surfaced by cache construction, policy parsing, and the backing store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// The requested configuration is unusable: bad associativity/divisibility,
    /// a zero line size, or an unknown policy name.
    ///
    /// Raised only at construction or parse time, never once a cache exists.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// An address fell outside the backing store's capacity.
    ///
    /// Raised only by [`BackingStore`](crate::mem::BackingStore) bounds checks.
    #[error("address {addr:#x} out of range for capacity {capacity:#x}")]
    OutOfRange {
        /// The offending address.
        addr: u64,
        /// The store's capacity in cells.
        capacity: u64,
    },
}
