//! Harness context.
//!
//! `Harness` owns the model, the collaborators, and all per-run state, replacing
//! process-wide globals. Independent harnesses can run side by side.

/// Clock driver and public harness operations.
pub mod harness;

pub use harness::Harness;
