//! Set-associative cache engine.
//!
//! This module implements the cache decision engine: tag/set/way lookup,
//! replacement-policy victim selection among candidate ways, write-policy and
//! write-miss-policy semantics, and eviction-triggered writeback to the
//! backing store.
//!
//! The cache touches the store only at well-defined moments: miss fills,
//! write-through writes, write-no-allocate writes, dirty-victim writebacks,
//! and explicit flushes. Every access reports whether a memory read or write
//! occurred so callers can account for traffic without reaching into the
//! store.

/// Cache replacement policy implementations (LRU, FIFO, Random).
pub mod policies;

use tracing::{debug, trace};

use self::policies::{FifoPolicy, LruPolicy, RandomPolicy, ReplacementPolicy};
use crate::common::addr::{AddrParts, Geometry};
use crate::common::error::SimError;
use crate::config::{
    CacheConfig, ReplacementPolicy as PolicyType, WriteMissPolicy, WritePolicy,
};
use crate::mem::BackingStore;

/// Cache line entry: tag, state bits, and the word cached from the line's
/// base address.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheLine {
    /// Tag identifying which block occupies this way. Meaningless while
    /// `valid` is false.
    pub tag: u64,
    /// Whether the line currently holds a block.
    pub valid: bool,
    /// Whether the line holds data newer than the backing store.
    /// `dirty` implies `valid`; only write-back ever sets it.
    pub dirty: bool,
    /// The word cached from the block's base address.
    pub data: u64,
}

/// Snapshot of a line taken just before it was overwritten by a refill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EvictedLine {
    /// The evicted block's tag.
    pub tag: u64,
    /// Validity at eviction time (always true on the eviction path).
    pub valid: bool,
    /// Whether the evicted line was written back.
    pub dirty: bool,
}

/// Outcome of a single cache access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccessResult {
    /// Whether the access hit in the cache.
    pub hit: bool,
    /// The set the address mapped to.
    pub set_index: usize,
    /// The way serviced by the access; `None` on the write-no-allocate miss
    /// path, which leaves the cache untouched.
    pub way_index: Option<usize>,
    /// Snapshot of the line displaced by this access, if any. Free-way fills
    /// evict nothing.
    pub evicted: Option<EvictedLine>,
    /// Whether the access read the backing store (miss fill).
    pub memory_read: bool,
    /// Whether the access wrote the backing store (write-through,
    /// write-no-allocate, or dirty-victim writeback).
    pub memory_write: bool,
}

/// The set-associative cache decision engine.
///
/// Owns per-line metadata in a flat arena indexed `set * ways + way`, plus
/// the per-set bookkeeping of its replacement policy. Issues reads and writes
/// to the [`BackingStore`] passed into each call; the store itself lives with
/// the caller.
pub struct Cache {
    lines: Vec<CacheLine>,
    num_sets: usize,
    ways: usize,
    geometry: Geometry,
    write_policy: WritePolicy,
    write_miss_policy: WriteMissPolicy,
    replacement: PolicyType,
    policy: Box<dyn ReplacementPolicy>,
}

impl Cache {
    /// Creates a cache from the given configuration.
    ///
    /// All lines start invalid and clean.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfiguration`] when the configuration
    /// fails [`CacheConfig::validate`]: zero `num_blocks`, `ways`, or
    /// `line_size`, or an associativity that does not divide `num_blocks`.
    pub fn new(config: &CacheConfig) -> Result<Self, SimError> {
        config.validate()?;

        let num_sets = config.num_blocks / config.ways;
        let geometry = Geometry::new(config.line_size, num_sets as u64)?;

        Ok(Self {
            lines: vec![CacheLine::default(); num_sets * config.ways],
            num_sets,
            ways: config.ways,
            geometry,
            write_policy: config.write_policy,
            write_miss_policy: config.write_miss_policy,
            replacement: config.policy,
            policy: Self::build_policy(config.policy, num_sets, config.ways),
        })
    }

    /// Builds the boxed replacement bookkeeping for `policy`.
    fn build_policy(
        policy: PolicyType,
        num_sets: usize,
        ways: usize,
    ) -> Box<dyn ReplacementPolicy> {
        match policy {
            PolicyType::Lru => Box::new(LruPolicy::new(num_sets, ways)),
            PolicyType::Fifo => Box::new(FifoPolicy::new(num_sets, ways)),
            PolicyType::Random => Box::new(RandomPolicy::new(num_sets, ways)),
        }
    }

    /// Returns the number of sets.
    pub fn num_sets(&self) -> usize {
        self.num_sets
    }

    /// Returns the associativity (ways per set).
    pub fn ways(&self) -> usize {
        self.ways
    }

    /// Returns the line size in addressable cells.
    pub fn line_size(&self) -> u64 {
        self.geometry.line_size()
    }

    /// Returns the active write policy.
    pub fn write_policy(&self) -> WritePolicy {
        self.write_policy
    }

    /// Returns the default write-miss policy.
    pub fn write_miss_policy(&self) -> WriteMissPolicy {
        self.write_miss_policy
    }

    /// Returns the active replacement policy.
    pub fn replacement(&self) -> PolicyType {
        self.replacement
    }

    /// Returns the lines of one set, ordered by way index.
    ///
    /// # Panics
    ///
    /// Panics if `set_index >= num_sets`.
    pub fn set_view(&self, set_index: usize) -> &[CacheLine] {
        let base = set_index * self.ways;
        &self.lines[base..base + self.ways]
    }

    /// Checks whether the block containing `addr` is currently cached.
    pub fn contains(&self, addr: u64) -> bool {
        let parts = self.geometry.split(addr);
        let base = parts.set_index * self.ways;
        self.lines[base..base + self.ways]
            .iter()
            .any(|line| line.valid && line.tag == parts.tag)
    }

    /// Performs one cache access.
    ///
    /// Translates `addr`, scans the target set, and applies the hit or miss
    /// path of the configured policies. `write_miss_policy` overrides the
    /// construction-time write-miss policy for this call only; `write_value`
    /// is stored into the line (and through to memory, where the policies say
    /// so) on writes.
    ///
    /// Never fails once construction succeeded and the addresses involved are
    /// within the store's capacity; always returns a complete
    /// [`AccessResult`].
    ///
    /// # Errors
    ///
    /// Propagates [`SimError::OutOfRange`] from the backing store when a
    /// fill, write-through, writeback, or no-allocate write lands outside its
    /// capacity.
    pub fn access(
        &mut self,
        store: &mut BackingStore,
        addr: u64,
        is_write: bool,
        write_miss_policy: Option<WriteMissPolicy>,
        write_value: Option<u64>,
    ) -> Result<AccessResult, SimError> {
        let parts = self.geometry.split(addr);
        let base = parts.set_index * self.ways;

        // Hit scan: at most one way holds a given tag.
        let hit_way = (0..self.ways).find(|&w| {
            let line = &self.lines[base + w];
            line.valid && line.tag == parts.tag
        });

        if let Some(way) = hit_way {
            self.policy.on_hit(parts.set_index, way);

            let line = &mut self.lines[base + way];
            let mut memory_write = false;
            if is_write {
                if let Some(value) = write_value {
                    line.data = value;
                }
                match self.write_policy {
                    WritePolicy::WriteBack => line.dirty = true,
                    WritePolicy::WriteThrough => {
                        store.write(parts.base_addr, line.data)?;
                        memory_write = true;
                    }
                }
            }

            return Ok(AccessResult {
                hit: true,
                set_index: parts.set_index,
                way_index: Some(way),
                evicted: None,
                memory_read: false,
                memory_write,
            });
        }

        // Write miss under write-no-allocate: the cache stays untouched and
        // the value goes straight to the store at the block's base address.
        let miss_policy = write_miss_policy.unwrap_or(self.write_miss_policy);
        if is_write && miss_policy == WriteMissPolicy::WriteNoAllocate {
            store.write(parts.base_addr, write_value.unwrap_or(0))?;
            return Ok(AccessResult {
                hit: false,
                set_index: parts.set_index,
                way_index: None,
                evicted: None,
                memory_read: false,
                memory_write: true,
            });
        }

        // Free invalid way (lowest index) is always filled first; this is a
        // fill, not an eviction, and bypasses the replacement policy.
        let free_way = (0..self.ways).find(|&w| !self.lines[base + w].valid);
        if let Some(way) = free_way {
            trace!(
                set = parts.set_index,
                way,
                tag = parts.tag,
                "filling free way"
            );
            let memory_write = self.fill(store, &parts, way, is_write, write_value)?;
            return Ok(AccessResult {
                hit: false,
                set_index: parts.set_index,
                way_index: Some(way),
                evicted: None,
                memory_read: true,
                memory_write,
            });
        }

        // Full set: ask the policy for a victim and write back its block
        // first if it is dirty.
        let way = self.policy.victim(parts.set_index);
        debug_assert!(way < self.ways, "policy returned way {way} of {}", self.ways);

        let victim = self.lines[base + way];
        let evicted = EvictedLine {
            tag: victim.tag,
            valid: victim.valid,
            dirty: victim.dirty,
        };

        let mut memory_write = false;
        if victim.valid && victim.dirty {
            let victim_base = self.geometry.base_of(victim.tag, parts.set_index);
            trace!(
                set = parts.set_index,
                way,
                tag = victim.tag,
                base = victim_base,
                "writing back dirty victim"
            );
            store.write(victim_base, victim.data)?;
            memory_write = true;
        }

        trace!(
            set = parts.set_index,
            way,
            old_tag = victim.tag,
            new_tag = parts.tag,
            "evicting"
        );
        memory_write |= self.fill(store, &parts, way, is_write, write_value)?;

        Ok(AccessResult {
            hit: false,
            set_index: parts.set_index,
            way_index: Some(way),
            evicted: Some(evicted),
            memory_read: true,
            memory_write,
        })
    }

    /// Fills `way` of the target set with the block at `parts`, reading the
    /// block's word from the store and applying write semantics.
    ///
    /// Returns whether a memory write occurred (write-through only).
    fn fill(
        &mut self,
        store: &mut BackingStore,
        parts: &AddrParts,
        way: usize,
        is_write: bool,
        write_value: Option<u64>,
    ) -> Result<bool, SimError> {
        let mut data = store.read(parts.base_addr)?;
        if is_write {
            if let Some(value) = write_value {
                data = value;
            }
        }

        let dirty = is_write && self.write_policy == WritePolicy::WriteBack;
        self.lines[parts.set_index * self.ways + way] = CacheLine {
            tag: parts.tag,
            valid: true,
            dirty,
            data,
        };

        let mut memory_write = false;
        if is_write && self.write_policy == WritePolicy::WriteThrough {
            store.write(parts.base_addr, data)?;
            memory_write = true;
        }

        self.policy.on_fill(parts.set_index, way);
        Ok(memory_write)
    }

    /// Writes every dirty line's word back to the store and clears its dirty
    /// bit, leaving the line valid.
    ///
    /// Produces exactly one writeback per currently-dirty line and is
    /// idempotent: a second call finds nothing dirty and writes nothing.
    /// Returns the number of lines flushed.
    ///
    /// # Errors
    ///
    /// Propagates [`SimError::OutOfRange`] if a dirty line's base address is
    /// outside the store's capacity.
    pub fn flush_all_dirty(&mut self, store: &mut BackingStore) -> Result<usize, SimError> {
        let mut flushed = 0;
        for set_index in 0..self.num_sets {
            for way in 0..self.ways {
                let line = &mut self.lines[set_index * self.ways + way];
                if line.valid && line.dirty {
                    let base = self.geometry.base_of(line.tag, set_index);
                    store.write(base, line.data)?;
                    line.dirty = false;
                    flushed += 1;
                }
            }
        }
        debug!(flushed, "flushed dirty lines");
        Ok(flushed)
    }

    /// Invalidates every line and clears all replacement bookkeeping.
    ///
    /// No memory traffic: dirty data is discarded, not written back. Call
    /// [`Cache::flush_all_dirty`] first to preserve it.
    pub fn reset(&mut self) {
        for line in &mut self.lines {
            *line = CacheLine::default();
        }
        self.policy.reset();
    }

    /// Switches the replacement policy at runtime.
    ///
    /// Bookkeeping is rebuilt from scratch; existing recency/insertion state
    /// is discarded. Cached lines are untouched.
    pub fn set_replacement(&mut self, policy: PolicyType) {
        debug!(from = %self.replacement, to = %policy, "switching replacement policy");
        self.replacement = policy;
        self.policy = Self::build_policy(policy, self.num_sets, self.ways);
    }

    /// Switches the write policy at runtime.
    ///
    /// Does not touch dirty bits; callers leaving write-back should flush
    /// first (see [`crate::sim::Simulator::switch_write_policy`]).
    pub fn set_write_policy(&mut self, policy: WritePolicy) {
        debug!(from = %self.write_policy, to = %policy, "switching write policy");
        self.write_policy = policy;
    }
}
