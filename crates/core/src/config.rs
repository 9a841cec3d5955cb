//! Configuration system for the cache simulator.
//!
//! This module defines all configuration structures and enums used to
//! parameterize a simulation. It provides:
//! 1. **Defaults:** Baseline constants for cache geometry and the backing store.
//! 2. **Structures:** Hierarchical config for the cache engine and memory.
//! 3. **Enums:** Replacement, write, and write-miss policy types.
//!
//! Policies are closed enums dispatched by exhaustive matching, so an unknown
//! policy name is a parse-time [`SimError::InvalidConfiguration`], never a
//! silent runtime fallback. Configuration is supplied via JSON (`serde`) or
//! `SimConfig::default()`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::error::SimError;

/// Default configuration constants for the simulator.
///
/// These values define the baseline cache and memory configuration when not
/// explicitly overridden.
mod defaults {
    /// Default total number of cache blocks (lines) across all sets.
    pub const NUM_BLOCKS: usize = 16;

    /// Default line size in addressable cells.
    ///
    /// A line size of 1 makes every address its own block, which keeps worked
    /// examples small; real geometries use larger power-of-two lines.
    pub const LINE_SIZE: u64 = 1;

    /// Default associativity (1 way = direct-mapped).
    pub const WAYS: usize = 1;

    /// Default backing store capacity in cells.
    pub const RAM_SIZE: u64 = 1024;
}

/// Cache replacement policy algorithms.
///
/// Specifies the algorithm used to select which cache line to evict when a
/// new line must be installed in a full set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReplacementPolicy {
    /// Least Recently Used: evicts the line accessed least recently.
    #[default]
    #[serde(alias = "Lru")]
    Lru,
    /// First In First Out: evicts the line filled longest ago, ignoring hits.
    #[serde(alias = "Fifo")]
    Fifo,
    /// Random: evicts a pseudo-randomly selected line.
    #[serde(alias = "Random")]
    Random,
}

impl fmt::Display for ReplacementPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lru => write!(f, "LRU"),
            Self::Fifo => write!(f, "FIFO"),
            Self::Random => write!(f, "Random"),
        }
    }
}

impl FromStr for ReplacementPolicy {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lru" => Ok(Self::Lru),
            "fifo" => Ok(Self::Fifo),
            "random" => Ok(Self::Random),
            other => Err(SimError::InvalidConfiguration(format!(
                "unknown replacement policy {other:?} (expected LRU, FIFO, or Random)"
            ))),
        }
    }
}

/// Write policies governing what a write hit does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WritePolicy {
    /// Writes go to memory immediately; lines never become dirty.
    #[default]
    WriteThrough,
    /// Writes mark the line dirty; memory is updated on eviction or flush.
    WriteBack,
}

impl fmt::Display for WritePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WriteThrough => write!(f, "write-through"),
            Self::WriteBack => write!(f, "write-back"),
        }
    }
}

impl FromStr for WritePolicy {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "write-through" => Ok(Self::WriteThrough),
            "write-back" => Ok(Self::WriteBack),
            other => Err(SimError::InvalidConfiguration(format!(
                "unknown write policy {other:?} (expected write-back or write-through)"
            ))),
        }
    }
}

/// Write-miss policies governing what a write miss does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WriteMissPolicy {
    /// Allocate a line for the missed block (read it in), then apply the write.
    #[default]
    WriteAllocate,
    /// Leave the cache untouched; write straight to the backing store.
    WriteNoAllocate,
}

impl fmt::Display for WriteMissPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WriteAllocate => write!(f, "write-allocate"),
            Self::WriteNoAllocate => write!(f, "write-no-allocate"),
        }
    }
}

impl FromStr for WriteMissPolicy {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "write-allocate" => Ok(Self::WriteAllocate),
            "write-no-allocate" => Ok(Self::WriteNoAllocate),
            other => Err(SimError::InvalidConfiguration(format!(
                "unknown write-miss policy {other:?} (expected write-allocate or write-no-allocate)"
            ))),
        }
    }
}

/// Root configuration structure for a simulation run.
///
/// # Examples
///
/// Deserializing from JSON:
///
/// ```
/// use cachesim_core::config::{ReplacementPolicy, SimConfig, WritePolicy};
///
/// let json = r#"{
///     "cache": {
///         "num_blocks": 4,
///         "line_size": 2,
///         "ways": 2,
///         "policy": "LRU",
///         "write_policy": "write-back",
///         "write_miss_policy": "write-allocate"
///     },
///     "memory": {
///         "ram_size": 256
///     }
/// }"#;
///
/// let config: SimConfig = serde_json::from_str(json).unwrap();
/// assert_eq!(config.cache.num_blocks, 4);
/// assert_eq!(config.cache.policy, ReplacementPolicy::Lru);
/// assert_eq!(config.cache.write_policy, WritePolicy::WriteBack);
/// assert_eq!(config.memory.ram_size, 256);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SimConfig {
    /// Cache geometry and policies.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Backing store parameters.
    #[serde(default)]
    pub memory: MemoryConfig,
}

/// Cache geometry and policy configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Total number of cache blocks (lines) across all sets.
    #[serde(default = "CacheConfig::default_num_blocks")]
    pub num_blocks: usize,

    /// Line size in addressable cells.
    #[serde(default = "CacheConfig::default_line_size")]
    pub line_size: u64,

    /// Associativity (number of ways per set). Must divide `num_blocks`.
    #[serde(default = "CacheConfig::default_ways")]
    pub ways: usize,

    /// Replacement policy.
    #[serde(default)]
    pub policy: ReplacementPolicy,

    /// Write policy.
    #[serde(default)]
    pub write_policy: WritePolicy,

    /// Write-miss policy.
    #[serde(default)]
    pub write_miss_policy: WriteMissPolicy,
}

impl CacheConfig {
    /// Returns the default total block count.
    fn default_num_blocks() -> usize {
        defaults::NUM_BLOCKS
    }

    /// Returns the default line size.
    fn default_line_size() -> u64 {
        defaults::LINE_SIZE
    }

    /// Returns the default associativity.
    fn default_ways() -> usize {
        defaults::WAYS
    }

    /// Checks the configuration for construction-time errors.
    ///
    /// Violations are configuration errors, never deferred to first access.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfiguration`] when `num_blocks` or `ways`
    /// is zero, when `ways` does not divide `num_blocks` evenly, or when
    /// `line_size` is zero.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.num_blocks == 0 {
            return Err(SimError::InvalidConfiguration(
                "num_blocks must be at least 1".into(),
            ));
        }
        if self.ways == 0 {
            return Err(SimError::InvalidConfiguration(
                "associativity must be at least 1".into(),
            ));
        }
        if self.num_blocks % self.ways != 0 {
            return Err(SimError::InvalidConfiguration(format!(
                "associativity {} must divide num_blocks {} evenly",
                self.ways, self.num_blocks
            )));
        }
        if self.line_size == 0 {
            return Err(SimError::InvalidConfiguration(
                "line_size must be a positive integer".into(),
            ));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    /// Creates a default cache configuration: 16 direct-mapped single-cell
    /// lines, LRU, write-through, write-allocate.
    fn default() -> Self {
        Self {
            num_blocks: defaults::NUM_BLOCKS,
            line_size: defaults::LINE_SIZE,
            ways: defaults::WAYS,
            policy: ReplacementPolicy::default(),
            write_policy: WritePolicy::default(),
            write_miss_policy: WriteMissPolicy::default(),
        }
    }
}

/// Backing store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// Backing store capacity in addressable cells.
    #[serde(default = "MemoryConfig::default_ram_size")]
    pub ram_size: u64,
}

impl MemoryConfig {
    /// Returns the default backing store capacity.
    fn default_ram_size() -> u64 {
        defaults::RAM_SIZE
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            ram_size: defaults::RAM_SIZE,
        }
    }
}
