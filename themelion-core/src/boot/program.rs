//! The standard board bring-up program
//!
//! Order matters everywhere here:
//!
//! - LEDs come first so every later failure stays observable.
//! - The RTC oscillator starts as early as possible; it has the longest
//!   physical settle time and stabilizes in parallel with the rest.
//! - Dividers go to conservative values *before* the oscillator switch so
//!   core/bus/flash clocks never exceed their rated maxima, even
//!   transiently.
//! - The post-switch wait is cycle-counted, not time-based: the clock is
//!   exactly the thing that is not yet trustworthy.
//! - Unused devices are put to sleep only once the bus is up, and the LEDs
//!   are cleared last to signal success.

use crate::power::Rail;
use crate::traits::{BoardSupport, DiagLed};

use super::sequencer::{BootError, BootStep, Milestone, Sequencer, Settle};

/// Stabilization spin after switching to FLL-external mode
///
/// Empirically derived iteration count. Kept as short as possible while
/// still letting serial output come up clean; until it elapses all UART
/// output is garbled.
pub const CLOCK_SETTLE_CYCLES: u32 = 100_000;

/// Build the standard bring-up sequence over a board
///
/// The returned sequencer is ready to [`run`](Sequencer::run). Steps 1-10
/// of the program have no failure path (register writes are assumed to
/// succeed); the device-sleep step retries the radio internally and the
/// whole pass either completes or hangs there.
pub fn standard_sequence<H: BoardSupport>() -> Result<Sequencer<H>, BootError> {
    let mut seq = Sequencer::new();

    seq.push(BootStep {
        name: "diag-pins",
        requires: &[],
        provides: &[Milestone::DiagObservable],
        action: |hw: &mut H| {
            hw.diag_init();
            hw.diag_set(DiagLed::Red);
            Ok(())
        },
        settle: Settle::None,
    })?;

    seq.push(BootStep {
        name: "rtc-oscillator",
        requires: &[],
        provides: &[Milestone::RtcOscRunning],
        action: |hw: &mut H| {
            hw.rtc_oscillator_start();
            Ok(())
        },
        settle: Settle::None,
    })?;

    seq.push(BootStep {
        name: "safe-dividers",
        requires: &[],
        provides: &[Milestone::SafeDividers],
        action: |hw: &mut H| {
            hw.safe_dividers_apply();
            Ok(())
        },
        settle: Settle::None,
    })?;

    seq.push(BootStep {
        name: "clock-source",
        requires: &[Milestone::SafeDividers, Milestone::RtcOscRunning],
        provides: &[Milestone::ClockStable],
        action: |hw: &mut H| {
            hw.external_reference_engage();
            Ok(())
        },
        settle: Settle::Cycles(CLOCK_SETTLE_CYCLES),
    })?;

    seq.push(BootStep {
        name: "core-clock",
        requires: &[Milestone::ClockStable],
        provides: &[Milestone::CoreClockCached],
        action: |hw: &mut H| {
            hw.core_clock_recompute();
            Ok(())
        },
        settle: Settle::None,
    })?;

    seq.push(BootStep {
        name: "cpu-init",
        requires: &[Milestone::CoreClockCached],
        provides: &[Milestone::CpuReady],
        action: |hw: &mut H| {
            hw.cpu_post_clock_init();
            hw.diag_set(DiagLed::Yellow);
            hw.diag_set(DiagLed::Green);
            Ok(())
        },
        settle: Settle::None,
    })?;

    seq.push(BootStep {
        name: "power-rails",
        requires: &[Milestone::CpuReady],
        provides: &[Milestone::RailsConfigured],
        action: |hw: &mut H| {
            hw.power_rails_init();
            // Vperiph for the on-board peripherals, AVDD for voltage
            // reads. Vsec stays off until an application asks for it.
            hw.power_rail_on(Rail::Peripheral);
            hw.power_rail_on(Rail::Analog);
            Ok(())
        },
        settle: Settle::None,
    })?;

    seq.push(BootStep {
        name: "trace-pins",
        requires: &[],
        provides: &[Milestone::TraceConfigured],
        action: |hw: &mut H| {
            hw.trace_pins_init();
            Ok(())
        },
        settle: Settle::None,
    })?;

    seq.push(BootStep {
        name: "spi-bus",
        requires: &[Milestone::RailsConfigured],
        provides: &[Milestone::BusReady],
        action: |hw: &mut H| {
            hw.bus_init();
            Ok(())
        },
        settle: Settle::None,
    })?;

    seq.push(BootStep {
        name: "device-sleep",
        requires: &[Milestone::BusReady],
        provides: &[Milestone::DevicesQuiesced],
        action: |hw: &mut H| {
            hw.devices_quiesce();
            Ok(())
        },
        settle: Settle::None,
    })?;

    seq.push(BootStep {
        name: "low-power",
        requires: &[Milestone::TraceConfigured],
        provides: &[Milestone::LowPowerConfigured],
        action: |hw: &mut H| {
            hw.low_power_init();
            Ok(())
        },
        settle: Settle::None,
    })?;

    seq.push(BootStep {
        name: "diag-clear",
        requires: &[Milestone::DevicesQuiesced, Milestone::LowPowerConfigured],
        provides: &[],
        action: |hw: &mut H| {
            hw.diag_clear_all();
            Ok(())
        },
        settle: Settle::None,
    })?;

    Ok(seq)
}
