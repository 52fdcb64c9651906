//! Kinetis K60 HAL for Themelion sensor nodes
//!
//! Register-level implementations of the `themelion-hal` traits:
//!
//! - GPIO pins (PORT mux/pull configuration + GPIO data registers)
//! - DSPI master (SPI0, byte transfers, GPIO-managed chip selects)
//! - Clock tree (SIM dividers, MCG FEE mode, per-revision FLL reference
//!   routing)
//! - RTC 32 kHz oscillator enable
//! - Cycle-counted busy-wait delays
//!
//! Builds for the thumbv7em target; nothing in here is host-testable,
//! which is exactly why the bring-up logic lives in `themelion-core`
//! instead.

#![no_std]

pub mod clock;
pub mod delay;
pub mod gpio;
mod regs;
pub mod rtc;
pub mod spi;

pub use clock::{K60Clock, Rev1ClockSource, Rev2ClockSource};
pub use delay::CyclesDelay;
pub use gpio::{K60Pin, Port};
pub use rtc::Rtc;
pub use spi::K60Spi;
