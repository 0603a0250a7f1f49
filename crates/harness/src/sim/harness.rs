//! Clock driver and public harness operations.
//!
//! `Harness::step` is the only operation that advances simulated time:
//! 1. Toggle the clock and evaluate until writeback retires an instruction or the time
//!    bound expires, updating the dnpc queue on every rising edge.
//! 2. Resolve the retiring instruction's next PC.
//! 3. Run two settle toggles so the resolver sees state the commit itself changed.
//!    Settle toggles are not simulated time: they do not advance [`SimClock`], so they
//!    count toward neither the time bound nor the sanity grace period.
//!
//! Every mutating operation takes `&mut self`; one harness must not be stepped from
//! several threads.

use std::fmt;

use tracing::debug;

use crate::bridge::{AddressSpace, FaultReporter, MemoryBridge};
use crate::common::Fault;
use crate::common::constants::{GPR_COUNT, SETTLE_TOGGLES};
use crate::config::{Config, GeneralConfig};
use crate::core::clock::{self, SimClock};
use crate::core::commit::is_committing;
use crate::core::dnpc::{NextPcResolver, Redirect};
use crate::core::reset;
use crate::core::sanity::SanityChecker;
use crate::dump::{RegisterDump, StageDump};
use crate::dut::{Csrs, HardwareModel};
use crate::stats::HarnessStats;

/// Co-simulation harness around one hardware model.
pub struct Harness<M> {
    model: M,
    bridge: MemoryBridge,
    reporter: Box<dyn FaultReporter>,
    clock: SimClock,
    resolver: NextPcResolver,
    sanity: SanityChecker,
    config: GeneralConfig,
    stats: HarnessStats,
    last_commit: Option<u64>,
}

impl<M: HardwareModel> Harness<M> {
    /// Creates a harness around `model`.
    ///
    /// Loads and stores the model issues go to `space`; illegal-instruction faults go to
    /// `reporter`. The model is not reset; call [`Harness::reset`] first.
    pub fn new(
        model: M,
        space: Box<dyn AddressSpace>,
        reporter: Box<dyn FaultReporter>,
        config: &Config,
    ) -> Self {
        Self {
            model,
            bridge: MemoryBridge::new(space),
            reporter,
            clock: SimClock::new(),
            resolver: NextPcResolver::new(),
            sanity: SanityChecker::new(config.general.sanity_grace_edges),
            config: config.general.clone(),
            stats: HarnessStats::default(),
            last_commit: None,
        }
    }

    /// Runs the reset sequence on the model.
    pub fn reset(&mut self) {
        reset::reset(&mut self.model, &mut self.bridge);
    }

    /// Advances until the next instruction retires.
    ///
    /// Returns the retiring PC, or `None` if the time bound expired first. Without a
    /// bound this only returns once the model retires something.
    pub fn step(&mut self) -> Option<u64> {
        let mut pc = is_committing(&self.model.snapshot().writeback);
        while pc.is_none() && self.clock.within(self.config.max_sim_time) {
            self.tick();
            pc = is_committing(&self.model.snapshot().writeback);
        }

        if let Some(pc) = pc {
            let writeback = self.model.snapshot().writeback;
            let resolution = self.resolver.resolve_on_commit(&writeback);
            self.stats.record_commit(resolution);
            self.last_commit = Some(pc);
            debug!("commit pc {:#x} dnpc {:#x}", pc, self.resolver.dnpc());
        } else {
            self.resolver.clear_resolved();
        }

        for _ in 0..SETTLE_TOGGLES {
            if clock::toggle(&mut self.model, &mut self.bridge) {
                self.observe_rising_edge();
            }
        }
        pc
    }

    fn tick(&mut self) {
        if self.clock.tick(&mut self.model, &mut self.bridge) {
            self.observe_rising_edge();
        }
    }

    fn observe_rising_edge(&mut self) {
        let snapshot = self.model.snapshot();
        if self.config.trace_stages {
            debug!(
                "rising edge {}\n{}",
                self.clock.rising_edges(),
                StageDump(&snapshot)
            );
        }
        if let Some(redirect) = self.resolver.update(&snapshot) {
            self.stats.record_queued(redirect.kind);
        }
    }

    /// Next PC of the last commit; 0 if it did not redirect.
    pub fn dnpc(&self) -> u64 {
        self.resolver.dnpc()
    }

    /// Redirect resolved at the last commit, if any.
    pub const fn redirect(&self) -> Option<Redirect> {
        self.resolver.resolved()
    }

    /// Checks writeback for an illegal instruction and reports it.
    ///
    /// The harness does not stop on a fault; the caller decides.
    pub fn sanity_check(&mut self) -> Option<Fault> {
        let writeback = self.model.snapshot().writeback;
        let fault = self.sanity.check(&writeback, self.clock.half_edges())?;
        self.stats.faults += 1;
        self.reporter.invalid_instruction(fault.pc());
        Some(fault)
    }

    /// General-purpose registers of the model.
    pub fn dump_registers(&self) -> [u64; GPR_COUNT] {
        self.model.gpr()
    }

    /// Trap CSRs of the model.
    pub fn dump_csrs(&self) -> Csrs {
        self.model.snapshot().csr
    }

    /// Registers together with the PC of the last commit (0 before the first).
    pub fn register_dump(&self) -> RegisterDump {
        RegisterDump {
            pc: self.last_commit.unwrap_or(0),
            gpr: self.model.gpr(),
        }
    }

    /// Simulated time driven so far.
    pub const fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// Number of queued redirect targets not yet claimed by a commit.
    pub fn pending_redirects(&self) -> usize {
        self.resolver.pending()
    }

    /// Queued redirect targets, oldest first.
    pub fn pending_targets(&self) -> impl Iterator<Item = u64> + '_ {
        self.resolver.pending_targets()
    }

    /// Counters for the run so far.
    pub fn stats(&self) -> HarnessStats {
        HarnessStats {
            half_edges: self.clock.half_edges(),
            rising_edges: self.clock.rising_edges(),
            ..self.stats
        }
    }

    /// The driven model.
    pub const fn model(&self) -> &M {
        &self.model
    }

    /// Mutable access to the driven model.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Mutable access to the address space behind the memory bridge.
    pub fn memory_mut(&mut self) -> &mut dyn AddressSpace {
        self.bridge.space_mut()
    }
}

impl<M: fmt::Debug> fmt::Debug for Harness<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Harness")
            .field("model", &self.model)
            .field("clock", &self.clock)
            .field("resolver", &self.resolver)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
