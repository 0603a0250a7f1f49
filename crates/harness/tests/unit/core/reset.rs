//! # Reset Sequencing Tests

use npcsim_core::bridge::{MemoryBridge, SparseMemory};
use npcsim_core::common::RESET_TOGGLES;
use npcsim_core::core::reset::reset;
use npcsim_core::dut::{HardwareModel, PipelineProbe, PipelineSnapshot};
use pretty_assertions::assert_eq;

use crate::common::builder::instruction::add;
use crate::common::harness::TestContext;
use crate::common::mocks::pipeline::ScriptedPipeline;

#[test]
fn test_reset_toggles_three_times_under_reset() {
    let mut model = ScriptedPipeline::new([add(0x1000)]);
    let mut mem = MemoryBridge::new(Box::new(SparseMemory::new()));

    reset(&mut model, &mut mem);

    assert_eq!(RESET_TOGGLES, 3);
    assert_eq!(model.clock_writes, 3);
    assert_eq!(model.evals, 3);
    assert_eq!(model.reset_history, vec![true, false], "asserted, then released");
    assert!(!model.in_reset());
}

#[test]
fn test_reset_clock_level_after_three_toggles() {
    let mut model = ScriptedPipeline::new([]);
    let mut mem = MemoryBridge::new(Box::new(SparseMemory::new()));
    reset(&mut model, &mut mem);
    assert!(model.clock(), "three toggles from low end high");

    let mut model = ScriptedPipeline::new([]).with_clock(true);
    reset(&mut model, &mut mem);
    assert!(!model.clock());
}

#[test]
fn test_reset_does_not_fetch() {
    let mut model = ScriptedPipeline::new([add(0x1000), add(0x1004)]);
    let mut mem = MemoryBridge::new(Box::new(SparseMemory::new()));

    reset(&mut model, &mut mem);

    assert_eq!(model.remaining(), 2, "rising edges under reset do not advance");
    assert_eq!(model.snapshot(), PipelineSnapshot::default());
}

#[test]
fn test_harness_reset_is_not_simulated_time() {
    let ctx = TestContext::new([add(0x1000)]).reset();

    assert_eq!(ctx.harness.clock().half_edges(), 0);
    assert_eq!(ctx.harness.clock().rising_edges(), 0);
    assert_eq!(ctx.harness.pending_redirects(), 0);
    assert_eq!(ctx.harness.model().evals, 3);
}
