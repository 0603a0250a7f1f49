//! Commit detection.

use crate::dut::StageSignals;

/// Returns the writeback PC if writeback holds a retiring instruction.
///
/// A commit at PC 0 is reported as `Some(0)`; only the invalid and bubble sentinels mean
/// no commit.
pub const fn is_committing(writeback: &StageSignals) -> Option<u64> {
    if writeback.id.is_instruction() {
        Some(writeback.pc)
    } else {
        None
    }
}
