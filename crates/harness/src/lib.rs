//! Co-simulation harness for a pipelined RV64 processor model.
//!
//! This crate drives an external, already-evaluated hardware model one half clock edge at a
//! time and reconstructs the architecturally correct next PC of every retired instruction:
//! 1. **DUT:** The `HardwareModel`/`PipelineProbe` traits, the pipeline snapshot, and a
//!    trace-replay adapter.
//! 2. **Bridge:** Memory and fault-reporting collaborators injected into the harness.
//! 3. **Core:** Clock, commit detection, the dnpc resolver queue, reset and sanity checks.
//! 4. **Simulation:** The `Harness` context that exposes `step`, `reset`, and the dumps.
//! 5. **Support:** Configuration, register dump formatting, and run statistics.

/// Memory bridge and fault reporting collaborators.
pub mod bridge;
/// Common types and constants (errors, faults, fixed protocol constants).
pub mod common;
/// Harness configuration (defaults, instruction id encoding, JSON loading).
pub mod config;
/// Clock, commit detection, next-PC resolution, reset, and sanity checking.
pub mod core;
/// Register and CSR dump formatting.
pub mod dump;
/// Device-under-test interface: probe traits, pipeline snapshot, replay adapter.
pub mod dut;
/// Harness context driving the model.
pub mod sim;
/// Run statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or load from JSON.
pub use crate::config::Config;
/// Harness context; construct with `Harness::new`.
pub use crate::sim::Harness;
