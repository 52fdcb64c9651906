//! On-board peripheral drivers
//!
//! Concrete drivers for the devices sharing the sensor node's SPI bus,
//! plus the diagnostic LED bank:
//!
//! - Serial NOR flash (deep power-down control)
//! - AT86RF2xx-family 802.15.4 radio (status poll, forced off, sleep)
//! - Diagnostic LEDs (red/yellow/green boot indicators)
//!
//! All drivers follow the shared-bus discipline from
//! [`themelion_core::bus`]: a device is selected only for the scope of a
//! single transfer.

#![no_std]
#![deny(unsafe_code)]

pub mod diag;
pub mod flash;
pub mod radio;
