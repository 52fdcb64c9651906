//! K60 clock tree
//!
//! Divider programming, the FEE (FLL engaged, external reference) mode
//! switch, and the per-revision routing of the RTC 32 kHz crystal into
//! the FLL reference input. With the 32.768 kHz reference and the DCO at
//! its 2929x high-range point, the FLL output is nominally 96 MHz.

use themelion_hal::clock::{ClockControl, ClockSourceStrategy};

use crate::regs::{
    modify32, read32, read8, write32, write8, MCG_C1, MCG_C4, MCG_C7, MCG_S, SIM_CLKDIV1,
    SIM_SOPT1, SIM_SOPT2,
};

/// Nominal FEE-mode FLL output
pub const FLL_OUTPUT_HZ: u32 = 96_000_000;

// SIM_CLKDIV1 divider fields hold ratio - 1
const OUTDIV1_SHIFT: u32 = 28;
const OUTDIV2_SHIFT: u32 = 24;
const OUTDIV3_SHIFT: u32 = 20;
const OUTDIV4_SHIFT: u32 = 16;

// SIM_SOPT2
const SOPT2_PLLFLLSEL: u32 = 1 << 16;
const SOPT2_MCGCLKSEL: u32 = 1 << 0;

// SIM_SOPT1 OSC32KSEL: single bit on rev 1 silicon, two-bit field on rev 2
const SOPT1_OSC32KSEL_REV1: u32 = 1 << 19;
const SOPT1_OSC32KSEL_MASK: u32 = 0x3 << 18;
const SOPT1_OSC32KSEL_RTC: u32 = 0x2 << 18;

// MCG_C1: CLKS = FLL output, IREFS = external reference
const C1_FEE: u8 = 0x00;
// MCG_C4: DMX32 + DRST_DRS = 3 puts the DCO at 2929 x 32768 Hz
const C4_DMX32_DRS3: u8 = 0xe0;
// MCG_C7 OSCSEL = RTC oscillator
const C7_OSCSEL_RTC: u8 = 0x01;

// MCG_S
const S_IREFST: u8 = 1 << 4;
const S_CLKST_MASK: u8 = 0x3 << 2;

/// K60 clock-tree controller
pub struct K60Clock {
    core_clock_hz: u32,
}

impl K60Clock {
    /// Take the clock tree (conceptually; the registers are not shared)
    pub fn new() -> Self {
        Self { core_clock_hz: 0 }
    }

    /// Cached core clock from the last recompute (0 = never computed)
    pub fn core_clock_hz(&self) -> u32 {
        self.core_clock_hz
    }
}

impl Default for K60Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockControl for K60Clock {
    fn set_dividers(&mut self, core: u8, bus: u8, flexbus: u8, flash: u8) {
        let field = |ratio: u8| u32::from(ratio.saturating_sub(1)) & 0xf;
        write32(
            SIM_CLKDIV1,
            field(core) << OUTDIV1_SHIFT
                | field(bus) << OUTDIV2_SHIFT
                | field(flexbus) << OUTDIV3_SHIFT
                | field(flash) << OUTDIV4_SHIFT,
        );
    }

    fn engage_fll_external(&mut self) {
        // FLL (not PLL) feeds the peripheral clock muxes
        modify32(SIM_SOPT2, |v| v & !SOPT2_PLLFLLSEL);

        write8(MCG_C4, C4_DMX32_DRS3);
        write8(MCG_C1, C1_FEE);

        // wait for the reference switch and the FLL to appear on CLKST
        while read8(MCG_S) & S_IREFST != 0 {}
        while read8(MCG_S) & S_CLKST_MASK != 0 {}
    }

    fn recompute_core_clock(&mut self) -> u32 {
        // assumes FEE mode at the 96 MHz DCO point
        let outdiv1 = (read32(SIM_CLKDIV1) >> OUTDIV1_SHIFT & 0xf) + 1;
        self.core_clock_hz = FLL_OUTPUT_HZ / outdiv1;
        self.core_clock_hz
    }
}

/// FLL reference routing for rev 1 silicon
pub struct Rev1ClockSource;

impl ClockSourceStrategy<K60Clock> for Rev1ClockSource {
    fn route_reference(&self, _ctl: &mut K60Clock) {
        // RTC 32 kHz onto OSC32K, then the MCG reference mux
        modify32(SIM_SOPT1, |v| v | SOPT1_OSC32KSEL_REV1);
        modify32(SIM_SOPT2, |v| v | SOPT2_MCGCLKSEL);
    }
}

/// FLL reference routing for rev 2 silicon
pub struct Rev2ClockSource;

impl ClockSourceStrategy<K60Clock> for Rev2ClockSource {
    fn route_reference(&self, _ctl: &mut K60Clock) {
        modify32(SIM_SOPT1, |v| {
            (v & !SOPT1_OSC32KSEL_MASK) | SOPT1_OSC32KSEL_RTC
        });
        write8(MCG_C7, C7_OSCSEL_RTC);
    }
}
