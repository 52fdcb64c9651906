//! Serial NOR flash power control
//!
//! The on-board flash is unused during early boot, so bring-up only
//! needs enough of a driver to push the device into deep power-down.
//! Read/program/erase support belongs to a future storage layer and is
//! deliberately absent here.

use themelion_core::bus::ChipSelect;
use themelion_hal::gpio::OutputPin;
use themelion_hal::spi::SpiBus;

/// DP - enter deep power-down
const CMD_DEEP_POWER_DOWN: u8 = 0xb9;

/// RES - release from deep power-down
const CMD_RELEASE_POWER_DOWN: u8 = 0xab;

/// Recovery time after release, before the first new command
pub const RELEASE_SETTLE_US: u32 = 30;

/// Serial NOR flash on the shared bus
pub struct SpiNorFlash<P: OutputPin> {
    cs: ChipSelect<P>,
}

impl<P: OutputPin> SpiNorFlash<P> {
    /// Take ownership of the chip-select line
    pub fn new(cs_pin: P) -> Self {
        Self {
            cs: ChipSelect::new(cs_pin),
        }
    }

    /// Deselect the device ahead of the first bus transfer
    pub fn init(&mut self) {
        self.cs.release();
    }

    /// Put the device into deep power-down
    ///
    /// In this state the flash ignores every command except release; it
    /// draws the least current the part can.
    pub fn deep_power_down<B: SpiBus>(&mut self, bus: &mut B) -> Result<(), B::Error> {
        let _selected = self.cs.select();
        bus.write(&[CMD_DEEP_POWER_DOWN])
    }

    /// Wake the device from deep power-down
    ///
    /// The part needs [`RELEASE_SETTLE_US`] before it accepts another
    /// command; the caller owns that wait.
    pub fn release_power_down<B: SpiBus>(&mut self, bus: &mut B) -> Result<(), B::Error> {
        let _selected = self.cs.select();
        bus.write(&[CMD_RELEASE_POWER_DOWN])
    }

    /// Whether the device is currently selected
    pub fn is_selected(&self) -> bool {
        self.cs.is_selected()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use themelion_hal_sim::{Journal, Op, SimPin, SimSpi};

    #[test]
    fn test_deep_power_down_command() {
        let journal = Journal::new();
        let mut bus = SimSpi::new(&journal);
        let mut flash = SpiNorFlash::new(SimPin::new("cs-flash", &journal));
        flash.init();

        flash.deep_power_down(&mut bus).unwrap();

        journal.with(|ops| {
            // select, command byte, deselect - in that order
            let select = ops
                .iter()
                .position(|op| *op == Op::PinLow("cs-flash"))
                .unwrap();
            let cmd = ops
                .iter()
                .position(|op| matches!(op, Op::SpiWrite(b) if b.as_slice() == [0xb9]))
                .unwrap();
            let deselect = ops
                .iter()
                .rposition(|op| *op == Op::PinHigh("cs-flash"))
                .unwrap();
            assert!(select < cmd && cmd < deselect);
        });
        assert!(!flash.is_selected());
    }

    #[test]
    fn test_release_deselects_after_command() {
        let journal = Journal::new();
        let mut bus = SimSpi::new(&journal);
        let mut flash = SpiNorFlash::new(SimPin::new("cs-flash", &journal));
        flash.init();

        flash.release_power_down(&mut bus).unwrap();

        assert!(!flash.is_selected());
        assert_eq!(
            journal.count(|op| matches!(op, Op::SpiWrite(b) if b.as_slice() == [0xab])),
            1
        );
    }
}
