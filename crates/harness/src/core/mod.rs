//! Harness core: the edge-level logic between the clock driver and the model.
//!
//! 1. **Clock:** Half-edge toggling with edge counters.
//! 2. **Commit:** Detection of a retiring instruction in writeback.
//! 3. **Dnpc:** Redirect classification and the in-order target queue.
//! 4. **Reset:** The synchronous reset sequence.
//! 5. **Sanity:** Illegal-instruction detection after pipeline fill.

/// Clock toggling and edge counters.
pub mod clock;

/// Commit detection.
pub mod commit;

/// Redirect classification and next-PC resolution.
pub mod dnpc;

/// Reset sequencing.
pub mod reset;

/// Illegal-instruction sanity check.
pub mod sanity;

pub use clock::SimClock;
pub use commit::is_committing;
pub use dnpc::{NextPcResolver, Redirect, RedirectKind, Resolution};
pub use sanity::SanityChecker;
