//! Cycle-counted busy-wait delays
//!
//! A plain no-op spin. Before the clock settles this is the only delay
//! primitive that means anything; afterwards `delay_us` becomes usable
//! once the core-clock estimate is updated.

use cortex_m::asm;
use themelion_hal::delay::Delay;

/// No-op-loop delay provider
pub struct CyclesDelay {
    cycles_per_us: u32,
}

impl CyclesDelay {
    /// Create a provider calibrated for the given core clock
    pub fn new(core_clock_hz: u32) -> Self {
        Self {
            cycles_per_us: (core_clock_hz / 1_000_000).max(1),
        }
    }

    /// Recalibrate after the core clock changes
    pub fn set_core_clock(&mut self, core_clock_hz: u32) {
        self.cycles_per_us = (core_clock_hz / 1_000_000).max(1);
    }
}

impl Delay for CyclesDelay {
    fn delay_cycles(&mut self, cycles: u32) {
        for _ in 0..cycles {
            asm::nop();
        }
    }

    fn delay_us(&mut self, us: u32) {
        self.delay_cycles(us.saturating_mul(self.cycles_per_us));
    }
}
