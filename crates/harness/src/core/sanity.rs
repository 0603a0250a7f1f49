//! Illegal-instruction sanity check.

use crate::common::Fault;
use crate::dut::{InstrKind, StageSignals};

/// Flags an illegal instruction in writeback once the pipeline has filled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SanityChecker {
    grace_edges: u64,
}

impl SanityChecker {
    /// Creates a checker that stays silent for the first `grace_edges` half edges.
    pub const fn new(grace_edges: u64) -> Self {
        Self { grace_edges }
    }

    /// Grace period in half edges.
    pub const fn grace_edges(&self) -> u64 {
        self.grace_edges
    }

    /// Checks writeback at simulated time `half_edges`.
    ///
    /// Startup bubbles can carry the illegal encoding, so nothing is reported until
    /// `half_edges` exceeds the grace period.
    pub fn check(&self, writeback: &StageSignals, half_edges: u64) -> Option<Fault> {
        if half_edges > self.grace_edges && writeback.id == InstrKind::Illegal {
            Some(Fault::IllegalInstruction(writeback.pc))
        } else {
            None
        }
    }
}
