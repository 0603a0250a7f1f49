use std::cell::RefCell;
use std::rc::Rc;

use npcsim_core::Config;
use npcsim_core::Harness;
use npcsim_core::bridge::AddressSpace;
use npcsim_core::dut::Csrs;

use crate::common::builder::instruction::ScriptedInstr;
use crate::common::mocks::fault::SharedReporter;
use crate::common::mocks::memory::{Access, RecordingMemory};
use crate::common::mocks::pipeline::ScriptedPipeline;

/// Half-edge bound applied by `TestContext::new`.
pub const TEST_TIME_BOUND: u64 = 1_000;

/// Default configuration with `TEST_TIME_BOUND` applied.
pub fn bounded_config() -> Config {
    let mut config = Config::default();
    config.general.max_sim_time = Some(TEST_TIME_BOUND);
    config
}

/// A harness over a scripted pipeline with recording memory and reporter.
pub struct TestContext {
    pub harness: Harness<ScriptedPipeline>,
    pub accesses: Rc<RefCell<Vec<Access>>>,
    pub reporter: SharedReporter,
}

impl TestContext {
    pub fn new(program: impl IntoIterator<Item = ScriptedInstr>) -> Self {
        Self::with_config(program, &bounded_config())
    }

    pub fn with_config(program: impl IntoIterator<Item = ScriptedInstr>, config: &Config) -> Self {
        Self::build(ScriptedPipeline::new(program), RecordingMemory::new(), config)
    }

    /// Builds a context from explicit parts. The harness is not reset.
    pub fn build(model: ScriptedPipeline, memory: RecordingMemory, config: &Config) -> Self {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::TRACE)
            .try_init();

        let accesses = memory.log();
        let reporter = SharedReporter::new();
        let harness = Harness::new(model, Box::new(memory), Box::new(reporter.clone()), config);
        Self {
            harness,
            accesses,
            reporter,
        }
    }

    /// Resets the model and returns the context ready to step.
    pub fn reset(mut self) -> Self {
        self.harness.reset();
        self
    }

    pub fn with_csrs(mut self, csr: Csrs) -> Self {
        *self.harness.model_mut().csrs_mut() = csr;
        self
    }

    /// Steps until `count` commits retire, collecting `(pc, dnpc)` per commit.
    ///
    /// Panics if the time bound expires first.
    pub fn run_commits(&mut self, count: usize) -> Vec<(u64, u64)> {
        (0..count)
            .map(|n| {
                let pc = self
                    .harness
                    .step()
                    .unwrap_or_else(|| panic!("commit {n} did not retire"));
                (pc, self.harness.dnpc())
            })
            .collect()
    }

    pub fn accesses(&self) -> Vec<Access> {
        self.accesses.borrow().clone()
    }

    pub fn memory(&mut self) -> &mut dyn AddressSpace {
        self.harness.memory_mut()
    }
}
