//! Board-agnostic bring-up logic for Themelion firmware
//!
//! This crate contains everything about board bring-up that does not
//! touch a hardware register directly:
//!
//! - Boot step sequencing engine with milestone pre/post-conditions
//! - The standard power/clock/peripheral bring-up program
//! - Power rail bookkeeping (every rail off until explicitly enabled)
//! - Chip-select discipline for the shared SPI bus
//! - Clock divider validation and configuration types
//! - Optional trace-pin set for low-power event instrumentation
//! - Timestamp continuity statistics for clock self-checks
//!
//! All of it runs against the `themelion-hal` traits, so the same code is
//! exercised on the K60 target and on the host against simulated hardware.

#![no_std]
#![deny(unsafe_code)]

// host-side tests (proptest) need the std macros
#[cfg(test)]
#[macro_use]
extern crate std;

pub mod boot;
pub mod bus;
pub mod clock;
pub mod power;
pub mod time;
pub mod trace;
pub mod traits;
