//! Common types and constants used throughout the harness.
//!
//! This module provides the building blocks shared by every component:
//! 1. **Constants:** Fixed protocol values (reset length, settle edges, bridge read width).
//! 2. **Error Handling:** The harness error type and the illegal-instruction fault.

/// Fixed protocol constants.
pub mod constants;

/// Error types and fault definitions.
pub mod error;

pub use constants::{GPR_COUNT, MEM_READ_WIDTH, RESET_TOGGLES, SETTLE_TOGGLES};
pub use error::{Fault, HarnessError};
