//! Diagnostic LED bank
//!
//! Three LEDs signal boot progress: red while bring-up runs, yellow and
//! green once the CPU is up on the new clock, all dark on success. After
//! a hang, whichever pattern is frozen on the LEDs identifies the step
//! that never finished.

use themelion_core::traits::DiagLed;
use themelion_hal::gpio::OutputPin;

/// The board's three diagnostic LEDs (active high)
pub struct DiagLeds<P: OutputPin> {
    red: P,
    yellow: P,
    green: P,
}

impl<P: OutputPin> DiagLeds<P> {
    /// Take ownership of the LED pins, all dark
    pub fn new(mut red: P, mut yellow: P, mut green: P) -> Self {
        red.set_low();
        yellow.set_low();
        green.set_low();
        Self { red, yellow, green }
    }

    fn pin_mut(&mut self, led: DiagLed) -> &mut P {
        match led {
            DiagLed::Red => &mut self.red,
            DiagLed::Yellow => &mut self.yellow,
            DiagLed::Green => &mut self.green,
        }
    }

    /// Light one LED
    pub fn set(&mut self, led: DiagLed) {
        self.pin_mut(led).set_high();
    }

    /// Darken one LED
    pub fn clear(&mut self, led: DiagLed) {
        self.pin_mut(led).set_low();
    }

    /// Darken all three
    pub fn clear_all(&mut self) {
        self.red.set_low();
        self.yellow.set_low();
        self.green.set_low();
    }

    /// Whether an LED is currently lit
    pub fn is_lit(&self, led: DiagLed) -> bool {
        match led {
            DiagLed::Red => self.red.is_set_high(),
            DiagLed::Yellow => self.yellow.is_set_high(),
            DiagLed::Green => self.green.is_set_high(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use themelion_hal_sim::{Journal, SimPin};

    fn leds<'a>(journal: &'a Journal) -> DiagLeds<SimPin<'a>> {
        DiagLeds::new(
            SimPin::new("led-red", journal),
            SimPin::new("led-yellow", journal),
            SimPin::new("led-green", journal),
        )
    }

    #[test]
    fn test_all_dark_after_init() {
        let journal = Journal::new();
        let leds = leds(&journal);

        assert!(!leds.is_lit(DiagLed::Red));
        assert!(!leds.is_lit(DiagLed::Yellow));
        assert!(!leds.is_lit(DiagLed::Green));
    }

    #[test]
    fn test_set_and_clear() {
        let journal = Journal::new();
        let mut leds = leds(&journal);

        leds.set(DiagLed::Red);
        assert!(leds.is_lit(DiagLed::Red));
        assert!(!leds.is_lit(DiagLed::Yellow));

        leds.clear(DiagLed::Red);
        assert!(!leds.is_lit(DiagLed::Red));
    }

    #[test]
    fn test_clear_all() {
        let journal = Journal::new();
        let mut leds = leds(&journal);

        leds.set(DiagLed::Red);
        leds.set(DiagLed::Yellow);
        leds.set(DiagLed::Green);
        leds.clear_all();

        assert_eq!(journal.pin_level("led-red"), Some(false));
        assert_eq!(journal.pin_level("led-yellow"), Some(false));
        assert_eq!(journal.pin_level("led-green"), Some(false));
    }
}
