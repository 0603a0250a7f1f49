//! Device-under-test interface.
//!
//! The harness never models the pipeline itself. It reads signals out of an externally
//! evaluated hardware model through the traits in this module:
//! 1. **Snapshot:** Semantic per-stage signals and the CSR block (`PipelineSnapshot`).
//! 2. **Traits:** `PipelineProbe` (read-only view) and `HardwareModel` (clock, reset, eval).
//! 3. **Replay:** `ReplayModel`, an adapter that replays recorded signal frames.

/// Trace-replay model adapter.
pub mod replay;

/// Pipeline snapshot types.
pub mod snapshot;

/// Model and probe traits.
pub mod traits;

pub use replay::{ReplayModel, TraceFrame};
pub use snapshot::{Csrs, InstrKind, PipelineSnapshot, StageSignals};
pub use traits::{HardwareModel, PipelineProbe};
