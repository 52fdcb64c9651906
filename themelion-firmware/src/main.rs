//! Themelion - K60 sensor node firmware
//!
//! Entry point: run the one-shot board bring-up, verify the cycle
//! counter advances smoothly, then park until an application scheduler
//! takes over.

#![no_std]
#![no_main]

use cortex_m::asm;
use cortex_m::peripheral::DWT;
use cortex_m_rt::entry;

#[cfg(feature = "defmt")]
use defmt::{info, warn};
#[cfg(feature = "defmt")]
use {defmt_rtt as _, panic_probe as _};

#[cfg(not(feature = "defmt"))]
#[panic_handler]
fn panic(_info: &core::panic::PanicInfo) -> ! {
    loop {
        asm::wfi();
    }
}

use themelion_core::time::ContinuityStats;

mod board;

/// Back-to-back cycle counter reads sampled by the self-check
const SELFTEST_SAMPLES: u32 = 100_000;

/// Largest acceptable delta between successive reads
const SELFTEST_MAX_DELTA: u64 = 1_000;

#[entry]
fn main() -> ! {
    #[cfg(feature = "defmt")]
    info!("themelion firmware starting");

    board::board_init();

    timer_continuity_check();

    loop {
        asm::wfi();
    }
}

/// Verify the cycle counter advances without jumps
///
/// A discontinuity here means the clock switch left the counter (or the
/// core clock itself) unstable, which would silently corrupt every
/// downstream timeout.
fn timer_continuity_check() {
    let mut stats = ContinuityStats::new();
    for _ in 0..=SELFTEST_SAMPLES {
        stats.record(u64::from(DWT::cycle_count()));
    }

    #[cfg(feature = "defmt")]
    info!(
        "cycle counter deltas: min={} avg={} max={}",
        stats.min().unwrap_or(0),
        stats.avg().unwrap_or(0),
        stats.max().unwrap_or(0),
    );

    if stats.within(SELFTEST_MAX_DELTA) {
        #[cfg(feature = "defmt")]
        info!("timer continuity ok");
    } else {
        #[cfg(feature = "defmt")]
        warn!("timer continuity violated");
    }
}
