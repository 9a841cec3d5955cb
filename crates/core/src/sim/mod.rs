//! Simulation orchestration.
//!
//! A thin layer over the cache engine: it sequences address streams into
//! cache accesses, accumulates statistics from the per-access event flags,
//! and exposes the policy-switch transitions the engine itself keeps out of
//! `access`. No cache logic lives here.

/// Deterministic address-pattern generators.
pub mod scenario;

/// The simulator façade.
pub mod simulator;

pub use scenario::Scenario;
pub use simulator::{Request, Simulator};
