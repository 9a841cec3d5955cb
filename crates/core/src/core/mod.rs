//! The cache decision engine.
//!
//! This module contains the non-trivial state and policy interaction of the
//! simulator: the set-associative lookup structure, replacement-policy victim
//! selection, and write/writeback semantics.

/// Set-associative cache engine and replacement policies.
pub mod cache;
