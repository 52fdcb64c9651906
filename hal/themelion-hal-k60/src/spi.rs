//! K60 DSPI master (SPI0)
//!
//! Byte-at-a-time polling master. Chip selects are *not* driven by the
//! DSPI peripheral: device handles own plain GPIO pins for CS so the
//! scoped-selection discipline in `themelion-core::bus` applies uniformly.

use core::convert::Infallible;

use themelion_hal::spi::{SpiBus, SpiConfig};

use crate::regs::{modify32, read32, write32, SIM_SCGC6, SPI0_CTAR0, SPI0_MCR, SPI0_POPR,
    SPI0_PUSHR, SPI0_SR};

const SCGC6_SPI0: u32 = 1 << 12;

// MCR
const MCR_MSTR: u32 = 1 << 31;
const MCR_HALT: u32 = 1 << 0;

// CTAR
const CTAR_FMSZ8: u32 = 7 << 27;
const CTAR_CPOL: u32 = 1 << 26;
const CTAR_CPHA: u32 = 1 << 25;

// SR
const SR_TCF: u32 = 1 << 31;

/// SPI0 in master mode
pub struct K60Spi {
    _private: (),
}

impl K60Spi {
    /// Gate the peripheral on and configure master mode
    ///
    /// `bus_clock_hz` is the bus clock feeding the baud divider; the
    /// actual SCK rate is the largest power-of-two division at or below
    /// `config.frequency`.
    pub fn new_master(config: SpiConfig, bus_clock_hz: u32) -> Self {
        modify32(SIM_SCGC6, |v| v | SCGC6_SPI0);

        let mut ctar = CTAR_FMSZ8 | Self::baud_field(bus_clock_hz, config.frequency);
        if config.mode.cpol() {
            ctar |= CTAR_CPOL;
        }
        if config.mode.cpha() {
            ctar |= CTAR_CPHA;
        }
        write32(SPI0_CTAR0, ctar);

        write32(SPI0_MCR, MCR_MSTR);
        modify32(SPI0_MCR, |v| v & !MCR_HALT);

        Self { _private: () }
    }

    /// Pick the BR field: SCK = bus clock / 2^(br + 1)
    fn baud_field(bus_clock_hz: u32, target_hz: u32) -> u32 {
        let mut br = 0u32;
        while br < 15 && bus_clock_hz >> (br + 1) > target_hz {
            br += 1;
        }
        br
    }

    fn shift_byte(&mut self, byte: u8) -> u8 {
        write32(SPI0_PUSHR, u32::from(byte));
        while read32(SPI0_SR) & SR_TCF == 0 {}
        write32(SPI0_SR, SR_TCF);
        (read32(SPI0_POPR) & 0xff) as u8
    }
}

impl SpiBus for K60Spi {
    type Error = Infallible;

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        for (r, &w) in read.iter_mut().zip(write.iter()) {
            *r = self.shift_byte(w);
        }
        Ok(())
    }

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        for &b in data {
            self.shift_byte(b);
        }
        Ok(())
    }

    fn transfer_in_place(&mut self, data: &mut [u8]) -> Result<(), Self::Error> {
        for b in data.iter_mut() {
            *b = self.shift_byte(*b);
        }
        Ok(())
    }
}
