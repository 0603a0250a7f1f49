//! Reset sequencing.

use tracing::info;

use crate::bridge::MemoryPort;
use crate::common::constants::RESET_TOGGLES;
use crate::core::clock::toggle;
use crate::dut::HardwareModel;

/// Holds reset asserted across three clock toggles, evaluating after each, then releases
/// it.
///
/// Starting from a low clock this is low→high→low→high, so reset spans at least one and a
/// half clock periods. Harness-side state (the dnpc queue, time counters) is untouched.
pub fn reset<M: HardwareModel + ?Sized>(model: &mut M, mem: &mut dyn MemoryPort) {
    model.set_reset(true);
    for _ in 0..RESET_TOGGLES {
        let _ = toggle(model, mem);
    }
    model.set_reset(false);
    info!("reset released");
}
