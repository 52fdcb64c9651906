//! Simulated clock tree

use core::cell::Cell;

use themelion_hal::clock::{ClockControl, ClockSourceStrategy};

use crate::journal::{Journal, Op};

/// Nominal FLL output used by the simulation (matches the K60 FLL driven
/// by a 32.768 kHz reference in high-range mode)
pub const SIM_FLL_HZ: u32 = 96_000_000;

/// Simulated clock-tree controller
///
/// Records divider/mode writes and models the cached core clock as
/// FLL output divided by the programmed core ratio.
pub struct SimClock<'a> {
    journal: &'a Journal,
    dividers: Cell<Option<(u8, u8, u8, u8)>>,
    reference_routed: Cell<bool>,
    fll_engaged: Cell<bool>,
    core_clock_hz: Cell<u32>,
}

impl<'a> SimClock<'a> {
    /// Create a clock tree in reset state
    pub fn new(journal: &'a Journal) -> Self {
        Self {
            journal,
            dividers: Cell::new(None),
            reference_routed: Cell::new(false),
            fll_engaged: Cell::new(false),
            core_clock_hz: Cell::new(0),
        }
    }

    /// Dividers last programmed, if any
    pub fn dividers(&self) -> Option<(u8, u8, u8, u8)> {
        self.dividers.get()
    }

    /// Whether the FLL reference has been routed
    pub fn is_reference_routed(&self) -> bool {
        self.reference_routed.get()
    }

    /// Whether FLL-engaged-external mode is active
    pub fn is_fll_engaged(&self) -> bool {
        self.fll_engaged.get()
    }

    /// Cached core clock (0 until recomputed)
    pub fn core_clock_hz(&self) -> u32 {
        self.core_clock_hz.get()
    }

    pub(crate) fn mark_reference_routed(&self) {
        self.reference_routed.set(true);
        self.journal.record(Op::RouteReference);
    }
}

impl ClockControl for SimClock<'_> {
    fn set_dividers(&mut self, core: u8, bus: u8, flexbus: u8, flash: u8) {
        self.dividers.set(Some((core, bus, flexbus, flash)));
        self.journal.record(Op::SetDividers(core, bus, flexbus, flash));
    }

    fn engage_fll_external(&mut self) {
        self.fll_engaged.set(true);
        self.journal.record(Op::EngageFll);
    }

    fn recompute_core_clock(&mut self) -> u32 {
        let core_div = self.dividers.get().map(|(core, _, _, _)| core).unwrap_or(1);
        let hz = if self.fll_engaged.get() && core_div > 0 {
            SIM_FLL_HZ / core_div as u32
        } else {
            0
        };
        self.core_clock_hz.set(hz);
        self.journal.record(Op::RecomputeCoreClock);
        hz
    }
}

/// Simulated reference-routing strategy
///
/// Stands in for the silicon-revision-specific routing on real chips.
pub struct SimClockSource;

impl<'a> ClockSourceStrategy<SimClock<'a>> for SimClockSource {
    fn route_reference(&self, ctl: &mut SimClock<'a>) {
        ctl.mark_reference_routed();
    }
}
