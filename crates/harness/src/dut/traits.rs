//! Model and probe traits.
//!
//! This module defines the narrow interface between the harness and a concrete hardware
//! model. It provides:
//! 1. **Observation:** `PipelineProbe` exposes the pipeline snapshot and register file.
//! 2. **Control:** `HardwareModel` adds the clock and reset lines and the evaluation
//!    primitive.
//!
//! One adapter implements these traits per concrete model; nothing else in the crate
//! depends on a model's signal names.

use crate::bridge::MemoryPort;
use crate::common::constants::GPR_COUNT;
use crate::dut::snapshot::PipelineSnapshot;

/// Read-only view of the model's pipeline state.
pub trait PipelineProbe {
    /// Returns the per-stage signals and CSRs as of the last evaluation.
    fn snapshot(&self) -> PipelineSnapshot;

    /// Returns the general-purpose register file.
    fn gpr(&self) -> [u64; GPR_COUNT];
}

/// A clocked hardware model the harness can drive.
///
/// Calls are treated as atomic and instantaneous. `eval` receives the memory port so that
/// loads and stores issued during evaluation reach the address space synchronously.
pub trait HardwareModel: PipelineProbe {
    /// Current level of the clock line.
    fn clock(&self) -> bool;

    /// Drives the clock line. Takes effect on the next `eval`.
    fn set_clock(&mut self, high: bool);

    /// Drives the synchronous reset line. Takes effect on the next `eval`.
    fn set_reset(&mut self, asserted: bool);

    /// Evaluates the model with the current inputs.
    fn eval(&mut self, mem: &mut dyn MemoryPort);
}
