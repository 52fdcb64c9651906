//! `embedded-hal` interoperability
//!
//! Themelion's pin traits are infallible (see [`crate::gpio`]); the
//! `embedded-hal` 1.0 equivalents are fallible. [`EhPin`] bridges the two
//! so Themelion pins can be handed to ecosystem drivers that expect
//! `embedded_hal::digital` traits.

use core::convert::Infallible;

use crate::gpio::OutputPin;

/// Wrapper exposing a Themelion [`OutputPin`] as an `embedded-hal` 1.0 pin
pub struct EhPin<P>(pub P);

impl<P> EhPin<P> {
    /// Unwrap the inner pin
    pub fn into_inner(self) -> P {
        self.0
    }
}

impl<P: OutputPin> embedded_hal::digital::ErrorType for EhPin<P> {
    type Error = Infallible;
}

impl<P: OutputPin> embedded_hal::digital::OutputPin for EhPin<P> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.set_low();
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.set_high();
        Ok(())
    }
}

impl<P: OutputPin> embedded_hal::digital::StatefulOutputPin for EhPin<P> {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(OutputPin::is_set_high(&self.0))
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(OutputPin::is_set_low(&self.0))
    }
}
