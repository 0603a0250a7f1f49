//! Fixed protocol constants.
//!
//! These values describe the contract between the harness and the DUT. They are not
//! configurable because the external checker and the hardware design both assume them.

/// Number of clock toggles performed while reset is asserted.
///
/// Three toggles (low→high→low→high) keep reset asserted for at least 1.5 clock
/// periods, which satisfies a synchronous reset.
pub const RESET_TOGGLES: usize = 3;

/// Number of clock toggles performed after a commit has been detected.
///
/// Trap-vector and register-derived targets can take one or two edges to become
/// stable in the model after the retiring instruction is seen in writeback.
pub const SETTLE_TOGGLES: usize = 2;

/// Byte width requested from the address space for every model load.
///
/// The bridge does not narrow reads; truncation and sign extension are the caller's
/// responsibility on the model side.
pub const MEM_READ_WIDTH: usize = 8;

/// Number of general-purpose registers exposed by the DUT.
pub const GPR_COUNT: usize = 32;
