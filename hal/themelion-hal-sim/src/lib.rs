//! Simulated hardware for host-side tests
//!
//! This crate implements the `themelion-hal` traits against a simulated
//! register file: every pin edge, bus transfer, clock-tree write and delay
//! is appended to a shared [`journal::Journal`]. Tests assemble a board
//! from simulated parts, run real bring-up logic against it, and then
//! assert ordering and state invariants over the journal.
//!
//! Nothing in here waits for real time; delays are recorded, not slept.

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod delay;
pub mod journal;
pub mod pin;
pub mod rtc;
pub mod spi;

pub use clock::{SimClock, SimClockSource};
pub use delay::SimDelay;
pub use journal::{Journal, Op};
pub use pin::SimPin;
pub use rtc::SimRtc;
pub use spi::SimSpi;
