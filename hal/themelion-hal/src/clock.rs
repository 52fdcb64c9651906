//! Clock tree abstractions
//!
//! The bring-up core drives the clock tree through [`ClockControl`]:
//! divider programming, the switch to FLL-engaged-external mode, and the
//! recomputation of the cached core-clock frequency.
//!
//! Routing the 32 kHz reference into the FLL differs between silicon
//! revisions of the same chip. That variation is captured once, at build
//! configuration time, by picking a [`ClockSourceStrategy`] implementation -
//! never by conditional compilation scattered through the sequence itself.

/// Clock tree controller
///
/// Implementations write the chip's divider and mode-control registers.
/// Divider arguments are divide *ratios* (1 = undivided); translating a
/// ratio into the register's encoding is the implementation's business.
pub trait ClockControl {
    /// Program the output dividers for core/system, bus, flexbus and flash
    /// clocks
    fn set_dividers(&mut self, core: u8, bus: u8, flexbus: u8, flash: u8);

    /// Switch the main clock mode to FLL engaged, external reference
    ///
    /// The reference must already be routed (see [`ClockSourceStrategy`])
    /// and the dividers must already hold safe values: the FLL output
    /// appears on the system clock the moment this returns, and nothing
    /// here re-checks the dividers.
    fn engage_fll_external(&mut self);

    /// Recompute and cache the core clock frequency, returning it in Hz
    ///
    /// All downstream timing code reads the cached value; it is only
    /// trustworthy after the post-switch settle wait has elapsed.
    fn recompute_core_clock(&mut self) -> u32;
}

/// Reference-clock routing, selected once per board build
///
/// One implementation exists per supported silicon revision. The board
/// picks an implementation at build configuration time and injects it into
/// the bring-up sequence; an unsupported revision fails the build, not the
/// boot.
pub trait ClockSourceStrategy<C: ClockControl> {
    /// Route the external 32 kHz oscillator to the FLL reference input
    fn route_reference(&self, ctl: &mut C);
}
