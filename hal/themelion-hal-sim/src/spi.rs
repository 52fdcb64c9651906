//! Simulated SPI bus with scripted device responses

use core::cell::RefCell;
use core::convert::Infallible;

use heapless::Vec;
use themelion_hal::spi::SpiBus;

use crate::journal::{Journal, Op, MAX_FRAME};

/// Maximum scripted response frames
pub const MAX_SCRIPT: usize = 32;

/// Simulated SPI master
///
/// Full-duplex transfers consume scripted response frames in FIFO order;
/// once the script runs dry the simulated device answers with zeros.
/// Plain writes never consume a response. All traffic is journaled.
pub struct SimSpi<'a> {
    journal: &'a Journal,
    responses: RefCell<Vec<Vec<u8, MAX_FRAME>, MAX_SCRIPT>>,
}

impl<'a> SimSpi<'a> {
    /// Create a bus with an empty response script
    pub fn new(journal: &'a Journal) -> Self {
        Self {
            journal,
            responses: RefCell::new(Vec::new()),
        }
    }

    /// Queue a response frame for the next full-duplex transfer
    ///
    /// Frames longer than [`MAX_FRAME`] bytes are truncated.
    pub fn push_response(&self, frame: &[u8]) {
        let mut buf: Vec<u8, MAX_FRAME> = Vec::new();
        for &b in frame.iter().take(MAX_FRAME) {
            // cannot fail: bounded by take()
            let _ = buf.push(b);
        }
        let _ = self.responses.borrow_mut().push(buf);
    }

    /// Remaining scripted frames
    pub fn responses_left(&self) -> usize {
        self.responses.borrow().len()
    }

    fn pop_response(&self) -> Option<Vec<u8, MAX_FRAME>> {
        let mut responses = self.responses.borrow_mut();
        if responses.is_empty() {
            None
        } else {
            Some(responses.remove(0))
        }
    }

    fn journal_frame(&self, bytes: &[u8], full_duplex: bool) {
        let mut buf: Vec<u8, MAX_FRAME> = Vec::new();
        for &b in bytes.iter().take(MAX_FRAME) {
            let _ = buf.push(b);
        }
        let op = if full_duplex {
            Op::SpiTransfer(buf)
        } else {
            Op::SpiWrite(buf)
        };
        self.journal.record(op);
    }
}

impl SpiBus for SimSpi<'_> {
    type Error = Infallible;

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        self.journal_frame(write, true);
        let response = self.pop_response();
        for (i, slot) in read.iter_mut().enumerate() {
            *slot = response
                .as_ref()
                .and_then(|r| r.get(i).copied())
                .unwrap_or(0);
        }
        Ok(())
    }

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.journal_frame(data, false);
        Ok(())
    }

    fn transfer_in_place(&mut self, data: &mut [u8]) -> Result<(), Self::Error> {
        self.journal_frame(data, true);
        let response = self.pop_response();
        for (i, slot) in data.iter_mut().enumerate() {
            *slot = response
                .as_ref()
                .and_then(|r| r.get(i).copied())
                .unwrap_or(0);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_responses_fifo() {
        let journal = Journal::new();
        let mut bus = SimSpi::new(&journal);
        bus.push_response(&[0x00, 0x1f]);
        bus.push_response(&[0x00, 0x08]);

        let mut frame = [0x81, 0x00];
        bus.transfer_in_place(&mut frame).unwrap();
        assert_eq!(frame, [0x00, 0x1f]);

        let mut frame = [0x81, 0x00];
        bus.transfer_in_place(&mut frame).unwrap();
        assert_eq!(frame, [0x00, 0x08]);
    }

    #[test]
    fn test_dry_script_reads_zeros() {
        let journal = Journal::new();
        let mut bus = SimSpi::new(&journal);

        let mut read = [0xaa; 3];
        bus.transfer(&mut read, &[1, 2, 3]).unwrap();
        assert_eq!(read, [0, 0, 0]);
    }

    #[test]
    fn test_writes_do_not_consume_script() {
        let journal = Journal::new();
        let mut bus = SimSpi::new(&journal);
        bus.push_response(&[0x55]);

        bus.write(&[0xb9]).unwrap();
        assert_eq!(bus.responses_left(), 1);

        journal.with(|ops| {
            assert!(matches!(ops[0], Op::SpiWrite(ref b) if b.as_slice() == [0xb9]));
        });
    }

    #[test]
    fn test_transfer_byte_uses_script() {
        let journal = Journal::new();
        let mut bus = SimSpi::new(&journal);
        bus.push_response(&[0x42]);

        assert_eq!(bus.transfer_byte(0xb9).unwrap(), 0x42);
    }
}
