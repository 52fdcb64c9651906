//! Simulated RTC oscillator
//!
//! There is no trait behind this; like its register-level counterpart it
//! is a chip peripheral the board wires up directly.

use core::cell::Cell;

use crate::journal::{Journal, Op};

/// Simulated 32 kHz RTC oscillator
pub struct SimRtc<'a> {
    journal: &'a Journal,
    running: Cell<bool>,
}

impl<'a> SimRtc<'a> {
    /// Create an oscillator in the stopped state
    pub fn new(journal: &'a Journal) -> Self {
        Self {
            journal,
            running: Cell::new(false),
        }
    }

    /// Enable the oscillator (idempotent)
    pub fn start_oscillator(&mut self) {
        self.running.set(true);
        self.journal.record(Op::RtcOscStart);
    }

    /// Whether the oscillator has been enabled
    pub fn is_running(&self) -> bool {
        self.running.get()
    }
}
