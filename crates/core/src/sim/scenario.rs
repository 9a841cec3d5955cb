//! Deterministic address-pattern generators.
//!
//! Canned access patterns for experiments: a row-major matrix traversal, a
//! pseudo-random stream, and interleaved instruction/data streams. All three
//! are deterministic (the random stream uses a fixed-seed xorshift64), so
//! runs are reproducible.

use std::fmt;
use std::str::FromStr;

use crate::common::error::SimError;
use crate::sim::simulator::Request;

/// Matrix side length for [`Scenario::MatrixTraversal`].
const MATRIX_DIM: u64 = 8;

/// Stream length and address bound for [`Scenario::RandomAccess`].
const RANDOM_LEN: usize = 128;
const RANDOM_ADDR_SPAN: u64 = 256;

/// Length of each stream in [`Scenario::Interleaved`].
const STREAM_LEN: u64 = 64;

/// Base address of the data stream in [`Scenario::Interleaved`].
const DATA_BASE: u64 = 100;

/// Number of distinct data addresses cycled by [`Scenario::Interleaved`].
const DATA_SPAN: u64 = 16;

/// A named, deterministic access pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scenario {
    /// Row-major walk over an 8×8 matrix: addresses `0..64` in order.
    MatrixTraversal,
    /// 128 pseudo-random addresses in `[0, 256)`.
    RandomAccess,
    /// Sequential instruction stream interleaved with a small, hot data
    /// window: `0, 100, 1, 101, ... `.
    Interleaved,
}

impl Scenario {
    /// Generates the scenario's request sequence (all reads).
    pub fn requests(self) -> Vec<Request> {
        match self {
            Self::MatrixTraversal => (0..MATRIX_DIM * MATRIX_DIM).map(Request::read).collect(),
            Self::RandomAccess => {
                let mut state: u64 = 0x0123_4567_89AB_CDEF;
                (0..RANDOM_LEN)
                    .map(|_| {
                        state ^= state << 13;
                        state ^= state >> 7;
                        state ^= state << 17;
                        Request::read(state % RANDOM_ADDR_SPAN)
                    })
                    .collect()
            }
            Self::Interleaved => {
                let mut requests = Vec::with_capacity((STREAM_LEN * 2) as usize);
                for i in 0..STREAM_LEN {
                    requests.push(Request::read(i));
                    requests.push(Request::read(DATA_BASE + i % DATA_SPAN));
                }
                requests
            }
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MatrixTraversal => write!(f, "matrix"),
            Self::RandomAccess => write!(f, "random"),
            Self::Interleaved => write!(f, "interleaved"),
        }
    }
}

impl FromStr for Scenario {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "matrix" => Ok(Self::MatrixTraversal),
            "random" => Ok(Self::RandomAccess),
            "interleaved" => Ok(Self::Interleaved),
            other => Err(SimError::InvalidConfiguration(format!(
                "unknown scenario {other:?} (expected matrix, random, or interleaved)"
            ))),
        }
    }
}
