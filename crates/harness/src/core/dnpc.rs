//! Redirect classification and next-PC ("dnpc") resolution.
//!
//! The DUT decides control flow in the memory stage but retires in writeback, one or more
//! edges later. The resolver bridges that gap:
//! 1. **Classify:** On every rising edge, [`classify`] inspects the snapshot and yields at
//!    most one redirect target, which is queued.
//! 2. **Resolve:** When an instruction retires, [`retiring_kind`] decides whether it
//!    redirects; if so the oldest queued target becomes the resolved next PC.
//!
//! Queue order equals program order only because the DUT retires in order, one
//! instruction per commit. The resolver relies on that and does not check it.
//!
//! Classification priority, first match wins:
//!
//! | # | Condition                                         | Target              |
//! |---|---------------------------------------------------|---------------------|
//! | 1 | memory: branch taken, not `jalr`                  | `pc + imm`          |
//! | 2 | memory: `jalr`                                    | `rs1_value + imm`   |
//! | 3 | memory: exception code > 0                        | `mtvec`             |
//! | 4 | writeback: `ecall`                                | `mtvec`             |
//! | 5 | writeback: `mret`                                 | `mepc`              |
//!
//! CSR targets are copied when queued, so later CSR writes do not affect them.

use std::collections::VecDeque;

use tracing::{trace, warn};

use crate::dut::{InstrKind, PipelineSnapshot, StageSignals};

/// Cause of a control-flow redirection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RedirectKind {
    /// Taken conditional branch.
    Branch,
    /// Indirect jump (`jalr`).
    IndirectJump,
    /// Synchronous exception.
    Exception,
    /// Environment call (`ecall`).
    SystemCall,
    /// Trap return (`mret`).
    TrapReturn,
}

/// A redirection and its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Redirect {
    /// What caused the redirection.
    pub kind: RedirectKind,
    /// Architecturally correct next PC.
    pub target: u64,
}

impl Redirect {
    /// Creates a redirect.
    pub const fn new(kind: RedirectKind, target: u64) -> Self {
        Self { kind, target }
    }
}

/// Classifies one rising edge. `None` means no redirection is visible this edge.
pub fn classify(snapshot: &PipelineSnapshot) -> Option<Redirect> {
    let mem = &snapshot.memory;
    let wb = &snapshot.writeback;
    let csr = &snapshot.csr;

    if mem.branch_taken() && mem.id != InstrKind::Jalr {
        Some(Redirect::new(RedirectKind::Branch, mem.pc.wrapping_add(mem.imm)))
    } else if mem.id == InstrKind::Jalr {
        Some(Redirect::new(
            RedirectKind::IndirectJump,
            mem.rs1_value.wrapping_add(mem.imm),
        ))
    } else if mem.has_exception() {
        Some(Redirect::new(RedirectKind::Exception, csr.mtvec))
    } else if wb.id == InstrKind::Ecall {
        Some(Redirect::new(RedirectKind::SystemCall, csr.mtvec))
    } else if wb.id == InstrKind::Mret {
        Some(Redirect::new(RedirectKind::TrapReturn, csr.mepc))
    } else {
        None
    }
}

/// Applies the classification conditions to the retiring instruction alone.
pub fn retiring_kind(writeback: &StageSignals) -> Option<RedirectKind> {
    if writeback.branch_taken() && writeback.id != InstrKind::Jalr {
        Some(RedirectKind::Branch)
    } else if writeback.id == InstrKind::Jalr {
        Some(RedirectKind::IndirectJump)
    } else if writeback.has_exception() {
        Some(RedirectKind::Exception)
    } else if writeback.id == InstrKind::Ecall {
        Some(RedirectKind::SystemCall)
    } else if writeback.id == InstrKind::Mret {
        Some(RedirectKind::TrapReturn)
    } else {
        None
    }
}

/// Outcome of resolving one commit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The retiring instruction falls through.
    Sequential,
    /// The retiring instruction redirects to the popped target.
    Redirected(Redirect),
    /// The retiring instruction redirects but nothing was queued for it.
    Underflow(RedirectKind),
}

/// Queue of pending redirect targets and the value resolved at the last commit.
#[derive(Clone, Debug, Default)]
pub struct NextPcResolver {
    queue: VecDeque<u64>,
    resolved: Option<Redirect>,
}

impl NextPcResolver {
    /// Creates an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Classifies a rising edge and queues its target, if any.
    pub fn update(&mut self, snapshot: &PipelineSnapshot) -> Option<Redirect> {
        let redirect = classify(snapshot)?;
        trace!(
            kind = ?redirect.kind,
            "queued dnpc {:#x} (pending {})",
            redirect.target,
            self.queue.len() + 1
        );
        self.queue.push_back(redirect.target);
        Some(redirect)
    }

    /// Resolves the next PC of the instruction retiring from `writeback`.
    ///
    /// A redirecting instruction takes the oldest queued target. A fall-through
    /// instruction clears the previous value. An empty queue resolves to no redirection;
    /// it means the DUT's timing no longer matches the resolver's assumptions, so it is
    /// logged.
    pub fn resolve_on_commit(&mut self, writeback: &StageSignals) -> Resolution {
        let Some(kind) = retiring_kind(writeback) else {
            self.resolved = None;
            return Resolution::Sequential;
        };
        if let Some(target) = self.queue.pop_front() {
            let redirect = Redirect::new(kind, target);
            self.resolved = Some(redirect);
            Resolution::Redirected(redirect)
        } else {
            warn!(
                kind = ?kind,
                "no queued dnpc for redirecting commit at pc {:#x}",
                writeback.pc
            );
            self.resolved = None;
            Resolution::Underflow(kind)
        }
    }

    /// Forgets the value resolved at the previous commit.
    pub fn clear_resolved(&mut self) {
        self.resolved = None;
    }

    /// Redirect resolved at the last commit, if it redirected.
    pub const fn resolved(&self) -> Option<Redirect> {
        self.resolved
    }

    /// Resolved next PC with 0 standing for "no redirection".
    pub fn dnpc(&self) -> u64 {
        self.resolved.map_or(0, |redirect| redirect.target)
    }

    /// Number of queued targets not yet claimed by a commit.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Queued targets, oldest first.
    pub fn pending_targets(&self) -> impl Iterator<Item = u64> + '_ {
        self.queue.iter().copied()
    }
}
