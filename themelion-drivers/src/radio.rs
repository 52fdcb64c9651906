//! AT86RF2xx-family 802.15.4 radio
//!
//! Bring-up cares about exactly one thing: getting the radio into its
//! lowest-power state before application code decides whether it is
//! needed. That takes a register read (TRX_STATUS), a forced state-machine
//! reset (FORCE_TRX_OFF) repeated until the radio confirms TRX_OFF, and
//! finally the SLP_TR line.

use themelion_core::bus::ChipSelect;
use themelion_hal::delay::Delay;
use themelion_hal::gpio::OutputPin;
use themelion_hal::spi::SpiBus;

/// TRX_STATUS register
const REG_TRX_STATUS: u8 = 0x01;

/// TRX_STATE register
const REG_TRX_STATE: u8 = 0x02;

/// Register read access flag
const ACCESS_READ: u8 = 0x80;

/// Register write access flag
const ACCESS_WRITE: u8 = 0xc0;

/// TRX_STATUS value once the transceiver is off
pub const STATUS_TRX_OFF: u8 = 0x08;

/// TRX_STATE command forcing the state machine off from any state
const CMD_FORCE_TRX_OFF: u8 = 0x03;

/// Spin between a forced reset and the status re-read
///
/// Cycle-counted: the shut-down runs during bring-up where time-based
/// delays are not yet available.
pub const RESET_SETTLE_CYCLES: u32 = 10_000;

/// 802.15.4 transceiver on the shared bus
pub struct Rf2xx<P: OutputPin> {
    cs: ChipSelect<P>,
    sleep: P,
}

impl<P: OutputPin> Rf2xx<P> {
    /// Take ownership of the chip-select and SLP_TR lines
    pub fn new(cs_pin: P, sleep_pin: P) -> Self {
        Self {
            cs: ChipSelect::new(cs_pin),
            sleep: sleep_pin,
        }
    }

    /// Drive SLP_TR low (awake) and deselect ahead of the first transfer
    pub fn init(&mut self) {
        self.sleep.set_low();
        self.cs.release();
    }

    /// Read the TRX_STATUS register
    pub fn trx_status<B: SpiBus>(&mut self, bus: &mut B) -> Result<u8, B::Error> {
        let _selected = self.cs.select();
        let mut frame = [ACCESS_READ | REG_TRX_STATUS, 0x00];
        bus.transfer_in_place(&mut frame)?;
        Ok(frame[1])
    }

    /// Force the transceiver state machine off
    pub fn force_trx_off<B: SpiBus>(&mut self, bus: &mut B) -> Result<(), B::Error> {
        let _selected = self.cs.select();
        bus.write(&[ACCESS_WRITE | REG_TRX_STATE, CMD_FORCE_TRX_OFF])
    }

    /// Reset-and-verify until the radio reports off, then assert SLP_TR
    ///
    /// The loop has no iteration cap: boot must not proceed with the
    /// radio awake and there is no supervisor to escalate to, so a radio
    /// that never reports TRX_OFF hangs the boot right here with the
    /// diagnostic LEDs frozen. Known liveness risk, kept deliberately.
    pub fn shut_down<B, D>(&mut self, bus: &mut B, delay: &mut D) -> Result<(), B::Error>
    where
        B: SpiBus,
        D: Delay,
    {
        let mut status = self.trx_status(bus)?;
        while status != STATUS_TRX_OFF {
            self.force_trx_off(bus)?;
            delay.delay_cycles(RESET_SETTLE_CYCLES);
            status = self.trx_status(bus)?;
        }
        self.sleep.set_high();
        Ok(())
    }

    /// Whether SLP_TR is asserted
    pub fn is_asleep(&self) -> bool {
        self.sleep.is_set_high()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use themelion_hal_sim::{Journal, Op, SimDelay, SimPin, SimSpi};

    fn radio<'a>(journal: &'a Journal) -> Rf2xx<SimPin<'a>> {
        let mut radio = Rf2xx::new(
            SimPin::new("cs-radio", journal),
            SimPin::new("radio-slp", journal),
        );
        radio.init();
        radio
    }

    fn reset_count(journal: &Journal) -> usize {
        journal.count(|op| matches!(op, Op::SpiWrite(b) if b.as_slice() == [0xc2, 0x03]))
    }

    #[test]
    fn test_status_read_frame() {
        let journal = Journal::new();
        let mut bus = SimSpi::new(&journal);
        bus.push_response(&[0x00, 0x1f]);
        let mut radio = radio(&journal);

        assert_eq!(radio.trx_status(&mut bus).unwrap(), 0x1f);
        journal.with(|ops| {
            assert!(ops
                .iter()
                .any(|op| matches!(op, Op::SpiTransfer(b) if b.as_slice() == [0x81, 0x00])));
        });
        assert!(!radio.is_asleep());
    }

    #[test]
    fn test_shut_down_immediate_when_already_off() {
        let journal = Journal::new();
        let mut bus = SimSpi::new(&journal);
        bus.push_response(&[0x00, STATUS_TRX_OFF]);
        let mut delay = SimDelay::new(&journal);
        let mut radio = radio(&journal);

        radio.shut_down(&mut bus, &mut delay).unwrap();

        assert_eq!(reset_count(&journal), 0);
        assert!(radio.is_asleep());
    }

    #[test]
    fn test_shut_down_retries_until_off() {
        let journal = Journal::new();
        let mut bus = SimSpi::new(&journal);
        // status sequence 0x00, 0x00, 0x08: two resets, then off
        bus.push_response(&[0x00, 0x00]);
        bus.push_response(&[0x00, 0x00]);
        bus.push_response(&[0x00, STATUS_TRX_OFF]);
        let mut delay = SimDelay::new(&journal);
        let mut radio = radio(&journal);

        radio.shut_down(&mut bus, &mut delay).unwrap();

        assert_eq!(reset_count(&journal), 2);
        assert_eq!(
            journal.count(|op| *op == Op::DelayCycles(RESET_SETTLE_CYCLES)),
            2
        );
        assert!(radio.is_asleep());
        // sleep line must only rise after the last status read
        journal.with(|ops| {
            let sleep = ops
                .iter()
                .position(|op| *op == Op::PinHigh("radio-slp"))
                .unwrap();
            let last_status = ops
                .iter()
                .rposition(|op| matches!(op, Op::SpiTransfer(b) if b.as_slice() == [0x81, 0x00]))
                .unwrap();
            assert!(last_status < sleep);
        });
    }

    #[test]
    fn test_each_transfer_scopes_its_selection() {
        let journal = Journal::new();
        let mut bus = SimSpi::new(&journal);
        bus.push_response(&[0x00, 0x00]);
        bus.push_response(&[0x00, STATUS_TRX_OFF]);
        let mut delay = SimDelay::new(&journal);
        let mut radio = radio(&journal);

        radio.shut_down(&mut bus, &mut delay).unwrap();

        // every select is matched by a deselect before the next select
        journal.with(|ops| {
            let mut selected = false;
            for op in ops {
                match op {
                    Op::PinLow("cs-radio") => {
                        assert!(!selected, "re-selected without deselect");
                        selected = true;
                    }
                    Op::PinHigh("cs-radio") => selected = false,
                    _ => {}
                }
            }
            assert!(!selected);
        });
    }
}
