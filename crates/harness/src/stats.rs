//! Run statistics collection and reporting.
//!
//! This module tracks what the harness observed over a run. It provides:
//! 1. **Time:** Half edges and rising edges driven by the clock driver.
//! 2. **Commits:** Retired instructions and how many of them redirected.
//! 3. **Redirects:** Queued targets broken down by cause.
//! 4. **Health:** Empty-queue pops and illegal-instruction faults.

use std::fmt;

use crate::core::dnpc::{RedirectKind, Resolution};

/// Counters for one harness run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HarnessStats {
    /// Half edges driven while waiting for a commit. Settle toggles are not counted.
    pub half_edges: u64,
    /// Rising edges driven while waiting for a commit.
    pub rising_edges: u64,
    /// Instructions seen retiring.
    pub commits: u64,
    /// Commits whose next PC came from the queue.
    pub redirects_resolved: u64,
    /// Redirecting commits that found the queue empty.
    pub queue_underflows: u64,
    /// Taken branches queued.
    pub branches: u64,
    /// Indirect jumps queued.
    pub indirect_jumps: u64,
    /// Exceptions queued.
    pub exceptions: u64,
    /// Environment calls queued.
    pub system_calls: u64,
    /// Trap returns queued.
    pub trap_returns: u64,
    /// Illegal-instruction faults reported.
    pub faults: u64,
}

impl HarnessStats {
    /// Counts a queued redirect.
    pub fn record_queued(&mut self, kind: RedirectKind) {
        match kind {
            RedirectKind::Branch => self.branches += 1,
            RedirectKind::IndirectJump => self.indirect_jumps += 1,
            RedirectKind::Exception => self.exceptions += 1,
            RedirectKind::SystemCall => self.system_calls += 1,
            RedirectKind::TrapReturn => self.trap_returns += 1,
        }
    }

    /// Counts a commit and how it resolved.
    pub fn record_commit(&mut self, resolution: Resolution) {
        self.commits += 1;
        match resolution {
            Resolution::Sequential => {}
            Resolution::Redirected(_) => self.redirects_resolved += 1,
            Resolution::Underflow(_) => self.queue_underflows += 1,
        }
    }

    /// Total redirects queued.
    pub const fn redirects_queued(&self) -> u64 {
        self.branches
            + self.indirect_jumps
            + self.exceptions
            + self.system_calls
            + self.trap_returns
    }
}

impl fmt::Display for HarnessStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cycles = self.rising_edges.max(1);
        writeln!(f, "==========================================================")?;
        writeln!(f, "CO-SIMULATION STATISTICS")?;
        writeln!(f, "==========================================================")?;
        writeln!(f, "sim_half_edges           {}", self.half_edges)?;
        writeln!(f, "sim_cycles               {}", self.rising_edges)?;
        writeln!(f, "sim_commits              {}", self.commits)?;
        #[allow(clippy::cast_precision_loss)]
        let ipc = self.commits as f64 / cycles as f64;
        writeln!(f, "sim_ipc                  {ipc:.4}")?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "REDIRECTS")?;
        writeln!(f, "  queued                 {}", self.redirects_queued())?;
        writeln!(f, "  resolved               {}", self.redirects_resolved)?;
        writeln!(f, "  branch                 {}", self.branches)?;
        writeln!(f, "  indirect_jump          {}", self.indirect_jumps)?;
        writeln!(f, "  exception              {}", self.exceptions)?;
        writeln!(f, "  ecall                  {}", self.system_calls)?;
        writeln!(f, "  mret                   {}", self.trap_returns)?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "HEALTH")?;
        writeln!(f, "  queue_underflows       {}", self.queue_underflows)?;
        write!(f, "  faults                 {}", self.faults)
    }
}
