//! Simulated GPIO pins

use themelion_hal::gpio::{InputPin, OutputPin};

use crate::journal::{Journal, Op};

/// Simulated push-pull pin
///
/// Every edge is recorded in the shared journal under the pin's name.
/// The current level is also kept locally so components that query their
/// own pins (`is_set_high`) behave like real hardware.
pub struct SimPin<'a> {
    name: &'static str,
    journal: &'a Journal,
    level: bool,
}

impl<'a> SimPin<'a> {
    /// Create a pin driving low
    pub fn new(name: &'static str, journal: &'a Journal) -> Self {
        Self {
            name,
            journal,
            level: false,
        }
    }

    /// Create a pin with an explicit initial level (not journaled)
    pub fn with_level(name: &'static str, journal: &'a Journal, level: bool) -> Self {
        Self {
            name,
            journal,
            level,
        }
    }

    /// Pin name used in journal entries
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl OutputPin for SimPin<'_> {
    fn set_high(&mut self) {
        self.level = true;
        self.journal.record(Op::PinHigh(self.name));
    }

    fn set_low(&mut self) {
        self.level = false;
        self.journal.record(Op::PinLow(self.name));
    }

    fn is_set_high(&self) -> bool {
        self.level
    }
}

impl InputPin for SimPin<'_> {
    fn is_high(&self) -> bool {
        self.level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_are_journaled() {
        let journal = Journal::new();
        let mut pin = SimPin::new("rail-vsec", &journal);

        pin.set_high();
        pin.set_low();

        assert_eq!(journal.pin_level("rail-vsec"), Some(false));
        assert_eq!(journal.len(), 2);
    }

    #[test]
    fn test_level_queries() {
        let journal = Journal::new();
        let mut pin = SimPin::with_level("cs-radio", &journal, true);

        assert!(pin.is_set_high());
        pin.set_low();
        assert!(pin.is_set_low());
        // initial level is not journaled, only the explicit edge
        assert_eq!(journal.len(), 1);
    }
}
