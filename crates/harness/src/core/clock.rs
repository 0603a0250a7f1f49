//! Clock toggling and edge counters.

use crate::bridge::MemoryPort;
use crate::dut::HardwareModel;

/// Flips the clock line and evaluates the model.
///
/// Returns `true` if the toggle produced a rising edge.
pub fn toggle<M: HardwareModel + ?Sized>(model: &mut M, mem: &mut dyn MemoryPort) -> bool {
    let high = !model.clock();
    model.set_clock(high);
    model.eval(mem);
    high
}

/// Simulated time as seen by the clock driver.
///
/// Counts only toggles made through [`SimClock::tick`]; the reset sequence runs before
/// simulated time starts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SimClock {
    half_edges: u64,
    rising_edges: u64,
}

impl SimClock {
    /// Creates a clock at time zero.
    pub const fn new() -> Self {
        Self {
            half_edges: 0,
            rising_edges: 0,
        }
    }

    /// Toggles the model's clock once and advances the counters.
    ///
    /// Returns `true` on a rising edge.
    pub fn tick<M: HardwareModel + ?Sized>(
        &mut self,
        model: &mut M,
        mem: &mut dyn MemoryPort,
    ) -> bool {
        let rising = toggle(model, mem);
        self.half_edges += 1;
        if rising {
            self.rising_edges += 1;
        }
        rising
    }

    /// Half edges driven so far.
    pub const fn half_edges(&self) -> u64 {
        self.half_edges
    }

    /// Rising edges driven so far.
    pub const fn rising_edges(&self) -> u64 {
        self.rising_edges
    }

    /// Returns `true` while another half edge fits under `bound`. `None` never expires.
    pub fn within(&self, bound: Option<u64>) -> bool {
        bound.is_none_or(|max| self.half_edges < max)
    }
}
