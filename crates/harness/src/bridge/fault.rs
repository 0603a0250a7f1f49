//! Fault reporting collaborator.

use tracing::error;

/// Receives faults the sanity checker observes.
///
/// The harness keeps driving the model after a report; halting is the reporter's or the
/// caller's decision.
pub trait FaultReporter {
    /// An illegal instruction reached writeback at `pc`.
    fn invalid_instruction(&mut self, pc: u64);
}

/// Reporter that logs each fault and remembers its PC.
#[derive(Debug, Clone, Default)]
pub struct LogReporter {
    reported: Vec<u64>,
}

impl LogReporter {
    /// Creates a reporter with no recorded faults.
    pub fn new() -> Self {
        Self::default()
    }

    /// PCs of every reported illegal instruction, oldest first.
    pub fn reported(&self) -> &[u64] {
        &self.reported
    }
}

impl FaultReporter for LogReporter {
    fn invalid_instruction(&mut self, pc: u64) {
        error!("invalid instruction reached writeback at pc {pc:#x}");
        self.reported.push(pc);
    }
}
