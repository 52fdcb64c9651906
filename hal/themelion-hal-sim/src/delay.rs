//! Simulated delays
//!
//! Delays are recorded, never slept; host tests assert on their presence
//! and position instead of waiting them out.

use themelion_hal::delay::Delay;

use crate::journal::{Journal, Op};

/// Journal-recording delay provider
pub struct SimDelay<'a> {
    journal: &'a Journal,
}

impl<'a> SimDelay<'a> {
    /// Create a delay provider
    pub fn new(journal: &'a Journal) -> Self {
        Self { journal }
    }
}

impl Delay for SimDelay<'_> {
    fn delay_cycles(&mut self, cycles: u32) {
        self.journal.record(Op::DelayCycles(cycles));
    }

    fn delay_us(&mut self, us: u32) {
        self.journal.record(Op::DelayUs(us));
    }
}
