//! Clock configuration and divider validation
//!
//! The K60 FLL locked to the 32.768 kHz RTC crystal produces a nominal
//! 96 MHz output. Each derived clock has a rated maximum; the divider set
//! is validated against those limits *before* it is ever written, because
//! the whole point of programming dividers first is that no derived clock
//! may exceed its rating even transiently during the source switch.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Nominal FLL output with the external 32 kHz reference
pub const FLL_OUTPUT_HZ: u32 = 96_000_000;

/// Dividers that keep every derived clock inside its rating at 96 MHz
pub const SAFE_DIVIDERS: ClockDividers = ClockDividers {
    core: 1,
    bus: 2,
    flexbus: 2,
    flash: 4,
};

/// Rated maximum for each derived clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockLimits {
    /// Core/system clock ceiling
    pub core_max_hz: u32,
    /// Bus clock ceiling
    pub bus_max_hz: u32,
    /// FlexBus clock ceiling
    pub flexbus_max_hz: u32,
    /// Flash clock ceiling
    pub flash_max_hz: u32,
}

/// K60 ratings: core <100 MHz, bus <50 MHz, FlexBus <50 MHz, flash <25 MHz
pub const K60_LIMITS: ClockLimits = ClockLimits {
    core_max_hz: 100_000_000,
    bus_max_hz: 50_000_000,
    flexbus_max_hz: 50_000_000,
    flash_max_hz: 25_000_000,
};

/// A derived clock output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockOutput {
    /// Core/system clock
    Core,
    /// Bus clock
    Bus,
    /// FlexBus clock
    FlexBus,
    /// Flash clock
    Flash,
}

/// Invalid clock configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockError {
    /// A divider ratio of zero is meaningless
    ZeroDivider(ClockOutput),
    /// A derived clock would exceed its rated maximum
    LimitExceeded {
        /// Which output would exceed its rating
        output: ClockOutput,
        /// Frequency the divider set would produce
        hz: u32,
        /// The rating it violates
        max_hz: u32,
    },
}

/// Output divider ratios (1 = undivided)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClockDividers {
    /// Core/system divider
    pub core: u8,
    /// Bus divider
    pub bus: u8,
    /// FlexBus divider
    pub flexbus: u8,
    /// Flash divider
    pub flash: u8,
}

impl ClockDividers {
    /// Check every derived clock against its rating for a given source
    pub fn validate(&self, source_hz: u32, limits: &ClockLimits) -> Result<(), ClockError> {
        let outputs = [
            (ClockOutput::Core, self.core, limits.core_max_hz),
            (ClockOutput::Bus, self.bus, limits.bus_max_hz),
            (ClockOutput::FlexBus, self.flexbus, limits.flexbus_max_hz),
            (ClockOutput::Flash, self.flash, limits.flash_max_hz),
        ];

        for (output, div, max_hz) in outputs {
            if div == 0 {
                return Err(ClockError::ZeroDivider(output));
            }
            let hz = source_hz / div as u32;
            if hz > max_hz {
                return Err(ClockError::LimitExceeded { output, hz, max_hz });
            }
        }
        Ok(())
    }
}

/// FLL reference selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ReferenceSource {
    /// Internal slow reference (power-on default)
    Internal,
    /// External 32.768 kHz RTC crystal
    ExternalRtc32k,
}

/// Immutable clock configuration applied during bring-up
///
/// Downstream peripheral timing may assume the configuration is stable
/// only after `settle_cycles` of busy-wait have elapsed following the
/// mode switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClockConfig {
    /// Output divider ratios
    pub dividers: ClockDividers,
    /// FLL reference
    pub source: ReferenceSource,
    /// Post-switch stabilization spin (cycle-counted)
    pub settle_cycles: u32,
}

impl ClockConfig {
    /// Validate the divider set against the given ratings
    pub fn validate(&self, source_hz: u32, limits: &ClockLimits) -> Result<(), ClockError> {
        self.dividers.validate(source_hz, limits)
    }
}

/// Cached core-clock frequency
///
/// Zero until the first recompute; all downstream timing code reads this
/// instead of re-deriving the frequency from registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CoreClock {
    hz: u32,
}

impl CoreClock {
    /// Unknown frequency (before the first recompute)
    pub const fn unknown() -> Self {
        Self { hz: 0 }
    }

    /// Store a freshly recomputed frequency
    pub fn update(&mut self, hz: u32) {
        self.hz = hz;
    }

    /// Cached frequency in Hz (0 = not yet computed)
    pub fn hz(&self) -> u32 {
        self.hz
    }
}
