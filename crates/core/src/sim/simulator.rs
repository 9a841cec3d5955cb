//! Simulator: owns the cache, the backing store, and the statistics.
//!
//! The simulator is a counting façade. Every access delegates to
//! [`Cache::access`] and folds the result's event flags into [`SimStats`];
//! it holds no replacement or write-policy logic of its own. Address
//! sequences can be loaded and stepped one access at a time, or run to
//! completion.

use crate::common::error::SimError;
use crate::config::{SimConfig, WritePolicy};
use crate::core::cache::{AccessResult, Cache};
use crate::mem::BackingStore;
use crate::stats::SimStats;

/// One queued access: an address, a read/write flag, and an optional value
/// for writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Request {
    /// The address to access.
    pub addr: u64,
    /// Whether this is a write.
    pub is_write: bool,
    /// Value carried by a write; ignored for reads.
    pub value: Option<u64>,
}

impl Request {
    /// A read of `addr`.
    pub fn read(addr: u64) -> Self {
        Self {
            addr,
            is_write: false,
            value: None,
        }
    }

    /// A write of `value` to `addr`.
    pub fn write(addr: u64, value: u64) -> Self {
        Self {
            addr,
            is_write: true,
            value: Some(value),
        }
    }
}

/// Top-level simulator: cache + backing store + running statistics.
///
/// Owns both components exclusively for the duration of a run; the model is
/// single-threaded and synchronous, with every access running to completion
/// before the next begins.
pub struct Simulator {
    /// The cache decision engine.
    pub cache: Cache,
    /// The backing store behind the cache.
    pub store: BackingStore,
    /// Counters accumulated across all accesses so far.
    pub stats: SimStats,
    sequence: Vec<Request>,
    index: usize,
}

impl Simulator {
    /// Creates a simulator from an already-built cache and store.
    pub fn new(cache: Cache, store: BackingStore) -> Self {
        Self {
            cache,
            store,
            stats: SimStats::new(),
            sequence: Vec::new(),
            index: 0,
        }
    }

    /// Creates a simulator from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfiguration`] if the cache configuration
    /// is invalid.
    pub fn from_config(config: &SimConfig) -> Result<Self, SimError> {
        Ok(Self::new(
            Cache::new(&config.cache)?,
            BackingStore::new(config.memory.ram_size),
        ))
    }

    /// Performs one access and updates the counters.
    ///
    /// # Errors
    ///
    /// Propagates [`SimError::OutOfRange`] from the backing store.
    pub fn access(&mut self, addr: u64, is_write: bool) -> Result<AccessResult, SimError> {
        self.request(Request {
            addr,
            is_write,
            value: None,
        })
    }

    /// Performs one access described by a [`Request`] and updates the counters.
    ///
    /// # Errors
    ///
    /// Propagates [`SimError::OutOfRange`] from the backing store.
    pub fn request(&mut self, req: Request) -> Result<AccessResult, SimError> {
        let result = self
            .cache
            .access(&mut self.store, req.addr, req.is_write, None, req.value)?;
        self.stats.record(&result);
        Ok(result)
    }

    /// Loads a sequence of requests and rewinds the step pointer.
    pub fn load_sequence(&mut self, requests: Vec<Request>) {
        self.sequence = requests;
        self.index = 0;
    }

    /// Loads a read-only address sequence.
    pub fn load_addresses(&mut self, addresses: &[u64]) {
        self.load_sequence(addresses.iter().copied().map(Request::read).collect());
    }

    /// Whether un-stepped requests remain in the loaded sequence.
    pub fn has_next(&self) -> bool {
        self.index < self.sequence.len()
    }

    /// Performs the next queued request, or returns `None` when the sequence
    /// is exhausted.
    ///
    /// # Errors
    ///
    /// Propagates [`SimError::OutOfRange`] from the backing store.
    pub fn step(&mut self) -> Result<Option<(Request, AccessResult)>, SimError> {
        if !self.has_next() {
            return Ok(None);
        }
        let req = self.sequence[self.index];
        self.index += 1;
        let result = self.request(req)?;
        Ok(Some((req, result)))
    }

    /// Runs the remaining sequence to completion, invoking `visit` after each
    /// access.
    ///
    /// # Errors
    ///
    /// Propagates [`SimError::OutOfRange`] from the backing store.
    pub fn run_all(
        &mut self,
        mut visit: impl FnMut(&Request, &AccessResult),
    ) -> Result<(), SimError> {
        while let Some((req, result)) = self.step()? {
            visit(&req, &result);
        }
        Ok(())
    }

    /// Flushes all dirty cache lines to the store.
    ///
    /// Each flushed line counts as one memory write in the statistics.
    /// Returns the number of lines flushed; idempotent.
    ///
    /// # Errors
    ///
    /// Propagates [`SimError::OutOfRange`] from the backing store.
    pub fn flush_dirty_lines(&mut self) -> Result<usize, SimError> {
        let flushed = self.cache.flush_all_dirty(&mut self.store)?;
        self.stats.memory_writes += flushed as u64;
        Ok(flushed)
    }

    /// Switches the cache's write policy, flushing first when leaving
    /// write-back for write-through so no dirty data is stranded.
    ///
    /// Returns the number of lines flushed by the transition (zero when none
    /// were dirty or no flush was needed).
    ///
    /// # Errors
    ///
    /// Propagates [`SimError::OutOfRange`] from the backing store.
    pub fn switch_write_policy(&mut self, policy: WritePolicy) -> Result<usize, SimError> {
        let mut flushed = 0;
        if self.cache.write_policy() == WritePolicy::WriteBack
            && policy == WritePolicy::WriteThrough
        {
            flushed = self.flush_dirty_lines()?;
        }
        self.cache.set_write_policy(policy);
        Ok(flushed)
    }

    /// Clears the cache, the counters, and the step pointer.
    ///
    /// The backing store keeps its contents; call
    /// [`BackingStore::reset`](crate::mem::BackingStore::reset) on
    /// [`Simulator::store`] to zero it as well.
    pub fn reset(&mut self) {
        self.cache.reset();
        self.stats.reset();
        self.index = 0;
    }
}
