//! Board definition for the K60 sensor node
//!
//! Pin assignments, the [`BoardSupport`] wiring over the real
//! peripherals, and the [`board_init`] entry point. This file is the only
//! place that knows which port/pin a given function lives on.

use core::convert::Infallible;

use themelion_core::boot::{standard_sequence, CLOCK_SETTLE_CYCLES};
use themelion_core::bus::ChipSelect;
use themelion_core::clock::{
    ClockConfig, CoreClock, ReferenceSource, FLL_OUTPUT_HZ, K60_LIMITS, SAFE_DIVIDERS,
};
use themelion_core::power::PowerRails;
use themelion_core::trace::{TraceEvent, TracePins};
use themelion_core::traits::{BoardSupport, DiagLed};
use themelion_drivers::diag::DiagLeds;
use themelion_drivers::flash::SpiNorFlash;
use themelion_drivers::radio::Rf2xx;
use themelion_hal::clock::{ClockControl, ClockSourceStrategy};
use themelion_hal::gpio::Pull;
use themelion_hal::spi::{Mode, SpiConfig};
use themelion_hal_k60::{CyclesDelay, K60Clock, K60Pin, K60Spi, Port, Rtc};

#[cfg(feature = "defmt")]
use defmt::{error, info};

#[cfg(feature = "k60-rev1")]
type BoardClockSource = themelion_hal_k60::Rev1ClockSource;
#[cfg(all(feature = "k60-rev2", not(feature = "k60-rev1")))]
type BoardClockSource = themelion_hal_k60::Rev2ClockSource;
#[cfg(not(any(feature = "k60-rev1", feature = "k60-rev2")))]
compile_error!("unknown CPU revision: enable exactly one of k60-rev1 / k60-rev2");

#[cfg(feature = "k60-rev1")]
const BOARD_CLOCK_SOURCE: BoardClockSource = themelion_hal_k60::Rev1ClockSource;
#[cfg(all(feature = "k60-rev2", not(feature = "k60-rev1")))]
const BOARD_CLOCK_SOURCE: BoardClockSource = themelion_hal_k60::Rev2ClockSource;

/// Core clock before the FLL switch (FEI mode out of reset)
const RESET_CORE_CLOCK_HZ: u32 = 20_970_000;

/// The board's one clock configuration, applied during bring-up
const BOARD_CLOCK: ClockConfig = ClockConfig {
    dividers: SAFE_DIVIDERS,
    source: ReferenceSource::ExternalRtc32k,
    settle_cycles: CLOCK_SETTLE_CYCLES,
};

/// Safe fixed SCK rate for the shared bus
const BUS_SCK_HZ: u32 = 5_000_000;

// Diagnostic LEDs
const LED_RED: (Port, u8) = (Port::C, 15);
const LED_YELLOW: (Port, u8) = (Port::C, 14);
const LED_GREEN: (Port, u8) = (Port::C, 13);

// Power switches
const POWER_VPERIPH: (Port, u8) = (Port::D, 7);
const POWER_AVDD: (Port, u8) = (Port::B, 17);
const POWER_VSEC: (Port, u8) = (Port::B, 16);

// Shared SPI bus devices
const RADIO_CS: (Port, u8) = (Port::D, 4);
const RADIO_SLP: (Port, u8) = (Port::C, 5);
const FLASH_CS: (Port, u8) = (Port::D, 5);
const ACCEL_CS: (Port, u8) = (Port::D, 0);
const NVRAM_CS: (Port, u8) = (Port::D, 6);

// Low-power trace points wired on this board revision
const TRACE_LPM_ENTRY: (Port, u8) = (Port::B, 18);
const TRACE_LPM_EXIT: (Port, u8) = (Port::B, 19);

fn out(pin: (Port, u8)) -> K60Pin {
    K60Pin::output(pin.0, pin.1, Pull::None)
}

fn unwrap_infallible<T>(res: Result<T, Infallible>) -> T {
    match res {
        Ok(v) => v,
        Err(never) => match never {},
    }
}

/// The K60 sensor node board
pub struct K60Node {
    leds: DiagLeds<K60Pin>,
    rails: PowerRails<K60Pin>,
    trace: TracePins<K60Pin>,
    trace_entry: Option<K60Pin>,
    trace_exit: Option<K60Pin>,
    bus: Option<K60Spi>,
    clock: K60Clock,
    source: BoardClockSource,
    rtc: Rtc,
    flash: SpiNorFlash<K60Pin>,
    radio: Rf2xx<K60Pin>,
    accel_cs: ChipSelect<K60Pin>,
    nvram_cs: ChipSelect<K60Pin>,
    retry_delay: CyclesDelay,
    core_clock: CoreClock,
    cp: Option<cortex_m::Peripherals>,
}

impl K60Node {
    /// Claim every pin and peripheral the bring-up touches
    pub fn new() -> Self {
        Self {
            leds: DiagLeds::new(out(LED_RED), out(LED_YELLOW), out(LED_GREEN)),
            rails: PowerRails::new(out(POWER_VPERIPH), out(POWER_AVDD), out(POWER_VSEC)),
            trace: TracePins::new(),
            trace_entry: Some(out(TRACE_LPM_ENTRY)),
            trace_exit: Some(out(TRACE_LPM_EXIT)),
            bus: None,
            clock: K60Clock::new(),
            source: BOARD_CLOCK_SOURCE,
            rtc: Rtc::new(),
            flash: SpiNorFlash::new(out(FLASH_CS)),
            radio: Rf2xx::new(out(RADIO_CS), out(RADIO_SLP)),
            accel_cs: ChipSelect::new(out(ACCEL_CS)),
            nvram_cs: ChipSelect::new(out(NVRAM_CS)),
            retry_delay: CyclesDelay::new(RESET_CORE_CLOCK_HZ),
            core_clock: CoreClock::unknown(),
            cp: cortex_m::Peripherals::take(),
        }
    }

    /// Cached core clock after bring-up
    pub fn core_clock_hz(&self) -> u32 {
        self.core_clock.hz()
    }
}

impl Default for K60Node {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardSupport for K60Node {
    fn diag_init(&mut self) {
        self.leds.clear_all();
    }

    fn diag_set(&mut self, led: DiagLed) {
        self.leds.set(led);
    }

    fn diag_clear_all(&mut self) {
        self.leds.clear_all();
    }

    fn rtc_oscillator_start(&mut self) {
        self.rtc.start_oscillator();
    }

    fn safe_dividers_apply(&mut self) {
        debug_assert!(BOARD_CLOCK.validate(FLL_OUTPUT_HZ, &K60_LIMITS).is_ok());
        let d = BOARD_CLOCK.dividers;
        self.clock.set_dividers(d.core, d.bus, d.flexbus, d.flash);
    }

    fn external_reference_engage(&mut self) {
        self.source.route_reference(&mut self.clock);
        self.clock.engage_fll_external();
    }

    fn core_clock_recompute(&mut self) -> u32 {
        let hz = self.clock.recompute_core_clock();
        self.core_clock.update(hz);
        self.retry_delay.set_core_clock(hz);
        hz
    }

    fn cpu_post_clock_init(&mut self) {
        if let Some(cp) = self.cp.as_mut() {
            cp.DCB.enable_trace();
            cp.DWT.enable_cycle_counter();
        }
    }

    fn power_rails_init(&mut self) {
        self.rails.init();
    }

    fn power_rail_on(&mut self, rail: themelion_core::power::Rail) {
        self.rails.switch_on(rail);
    }

    fn trace_pins_init(&mut self) {
        if let Some(pin) = self.trace_entry.take() {
            self.trace.attach(TraceEvent::LowPowerEntry, pin);
        }
        if let Some(pin) = self.trace_exit.take() {
            self.trace.attach(TraceEvent::LowPowerExit, pin);
        }
    }

    fn bus_init(&mut self) {
        let bus_clock_hz = self.core_clock.hz() / u32::from(BOARD_CLOCK.dividers.bus);
        self.bus = Some(K60Spi::new_master(
            SpiConfig {
                frequency: BUS_SCK_HZ,
                mode: Mode::Mode0,
            },
            bus_clock_hz,
        ));

        self.flash.init();
        self.radio.init();
        self.accel_cs.release();
        self.nvram_cs.release();
    }

    fn devices_quiesce(&mut self) {
        let Some(bus) = self.bus.as_mut() else {
            // unreachable: the sequencer orders bus-init first
            return;
        };
        unwrap_infallible(self.flash.deep_power_down(bus));
        unwrap_infallible(self.radio.shut_down(bus, &mut self.retry_delay));
    }

    fn low_power_init(&mut self) {
        // default to wait mode; the power manager escalates explicitly
        if let Some(cp) = self.cp.as_mut() {
            cp.SCB.clear_sleepdeep();
        }
        self.trace.lower(TraceEvent::LowPowerEntry);
        self.trace.lower(TraceEvent::LowPowerExit);
    }
}

/// One-shot board bring-up
///
/// Invoked exactly once before any other system code. There is no return
/// value and no recovery: a failed bring-up parks the CPU with the
/// diagnostic LEDs frozen at the last step reached.
pub fn board_init() {
    let mut node = K60Node::new();
    let mut delay = CyclesDelay::new(RESET_CORE_CLOCK_HZ);

    let Ok(mut seq) = standard_sequence::<K60Node>() else {
        // the standard program always fits the step budget
        park()
    };

    if let Err(_err) = seq.run(&mut node, &mut delay) {
        #[cfg(feature = "defmt")]
        error!("board bring-up failed: {}", _err);
        park()
    }

    #[cfg(feature = "defmt")]
    info!("board bring-up complete, core clock {} Hz", node.core_clock_hz());
}

fn park() -> ! {
    loop {
        cortex_m::asm::wfi();
    }
}
