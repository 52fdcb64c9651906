//! Themelion Hardware Abstraction Layer
//!
//! This crate defines the hardware traits consumed by the bring-up core
//! and the peripheral drivers. Chip-specific HALs (K60, host simulation)
//! implement them, so the same bring-up logic runs against real registers
//! and against a simulated register file.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  themelion-core / themelion-drivers     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  themelion-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ themelion-    │       │ themelion-    │
//! │   hal-k60     │       │   hal-sim     │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`spi::SpiBus`] - SPI master transfers
//! - [`clock::ClockControl`], [`clock::ClockSourceStrategy`] - Clock tree
//! - [`delay::Delay`] - Busy-wait delays (cycle- and time-based)

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod compat;
pub mod delay;
pub mod gpio;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use clock::{ClockControl, ClockSourceStrategy};
pub use delay::Delay;
pub use gpio::{InputPin, OutputPin};
pub use spi::SpiBus;
