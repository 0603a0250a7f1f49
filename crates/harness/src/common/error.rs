//! Fault and error definitions.
//!
//! This module defines the two failure channels of the harness:
//! 1. **Faults:** Conditions observed in the DUT that the caller must treat as fatal.
//!    The harness reports them but keeps driving the model.
//! 2. **Errors:** Failures of the harness itself (configuration, trace input, I/O).

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// A fatal condition observed in the DUT.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fault {
    /// The writeback stage carried the illegal-instruction encoding after the grace
    /// period. The associated value is the writeback PC.
    IllegalInstruction(u64),
}

impl Fault {
    /// Returns the PC the fault was observed at.
    pub const fn pc(self) -> u64 {
        match self {
            Self::IllegalInstruction(pc) => pc,
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IllegalInstruction(pc) => write!(f, "IllegalInstruction({pc:#x})"),
        }
    }
}

impl std::error::Error for Fault {}

/// Errors raised by the harness outside of simulation itself.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The configuration JSON could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[source] serde_json::Error),

    /// A file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A trace frame could not be parsed.
    #[error("malformed trace frame at line {line}: {source}")]
    TraceFrame {
        /// 1-based line number in the trace input.
        line: usize,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// A trace line could not be read from its source.
    #[error("failed to read trace line {line}: {source}")]
    TraceRead {
        /// 1-based line number in the trace input.
        line: usize,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Result alias used across the harness.
pub type Result<T> = std::result::Result<T, HarnessError>;
