//! GPIO pin abstractions
//!
//! Digital I/O traits implemented by chip-specific HALs. During bring-up
//! output pins serve three distinct roles: diagnostic LEDs, power-switch
//! control lines, and chip-select lines on the shared SPI bus. All three
//! are plain push-pull outputs; the roles are distinguished by the
//! components that own the pins, not by the trait.

/// Digital output pin
///
/// Infallible by design: a GPIO data register write on the targets we
/// support cannot fail, and the bring-up sequence has no recovery path
/// for one that did.
pub trait OutputPin {
    /// Drive the pin high (logic 1)
    fn set_high(&mut self);

    /// Drive the pin low (logic 0)
    fn set_low(&mut self);

    /// Drive the pin to an explicit level
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Last level written to the pin's output register
    fn is_set_high(&self) -> bool;

    /// Inverse of [`OutputPin::is_set_high`]
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Digital input pin
pub trait InputPin {
    /// Read the pin level (logic 1 = true)
    fn is_high(&self) -> bool;

    /// Inverse of [`InputPin::is_high`]
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Pull resistor selection applied when a pin is configured
///
/// Chip HAL constructors take this at pin-init time; the traits above
/// deliberately have no runtime reconfiguration surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pull {
    /// No pull resistor
    #[default]
    None,
    /// Internal pull-up enabled
    Up,
    /// Internal pull-down enabled
    Down,
}
