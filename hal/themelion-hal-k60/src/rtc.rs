//! RTC 32 kHz oscillator
//!
//! Only the oscillator enable lives here: the crystal needs on the order
//! of half a second to stabilize, so bring-up starts it first and lets it
//! settle while everything else initializes. Time-of-day registers are a
//! matter for a later RTC driver.

use crate::regs::{modify32, RTC_CR, SIM_SCGC6};

const SCGC6_RTC: u32 = 1 << 29;
const CR_OSCE: u32 = 1 << 8;

/// RTC oscillator handle
pub struct Rtc {
    _private: (),
}

impl Rtc {
    /// Enable register access to the RTC block
    pub fn new() -> Self {
        modify32(SIM_SCGC6, |v| v | SCGC6_RTC);
        Self { _private: () }
    }

    /// Start the 32.768 kHz crystal oscillator (idempotent)
    pub fn start_oscillator(&mut self) {
        modify32(RTC_CR, |v| v | CR_OSCE);
    }
}

impl Default for Rtc {
    fn default() -> Self {
        Self::new()
    }
}
