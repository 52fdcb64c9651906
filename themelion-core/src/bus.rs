//! Chip-select discipline for the shared SPI bus
//!
//! Several devices share one bus; exactly one chip-select may be asserted
//! (logic low) during a transfer. [`ChipSelect::select`] returns an RAII
//! guard that deselects on drop, so every exit path - including early `?`
//! returns inside a transfer - restores the deselected state. A device
//! left selected would corrupt every subsequent transfer on the bus.

use themelion_hal::gpio::OutputPin;

/// Active-low chip-select line for one bus device
///
/// Construction deselects the device; the line is only ever low inside
/// the lifetime of a [`SelectGuard`].
pub struct ChipSelect<P: OutputPin> {
    pin: P,
}

impl<P: OutputPin> ChipSelect<P> {
    /// Take ownership of the CS pin, driving it to deselected
    pub fn new(mut pin: P) -> Self {
        pin.set_high();
        Self { pin }
    }

    /// Re-assert the deselected state
    ///
    /// Bus bring-up drives every device's CS line high before the first
    /// transfer rather than trusting construction-time state.
    pub fn release(&mut self) {
        self.pin.set_high();
    }

    /// Assert the chip-select for the duration of the returned guard
    pub fn select(&mut self) -> SelectGuard<'_, P> {
        self.pin.set_low();
        SelectGuard { pin: &mut self.pin }
    }

    /// Whether the device is currently selected
    pub fn is_selected(&self) -> bool {
        self.pin.is_set_low()
    }
}

/// Scoped chip-select assertion
///
/// Deselects the device when dropped, however the scope is left.
pub struct SelectGuard<'a, P: OutputPin> {
    pin: &'a mut P,
}

impl<P: OutputPin> Drop for SelectGuard<'_, P> {
    fn drop(&mut self) {
        self.pin.set_high();
    }
}
