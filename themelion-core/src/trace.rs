//! Low-power trace pins
//!
//! Boards may route individual GPIO pins to a logic analyzer to timestamp
//! low-power state transitions. Every trace point is independently
//! optional: a board that only wires the entry/exit pair is just as valid
//! as one that wires all six, and raising an unattached event is a no-op,
//! not an error.

use themelion_hal::gpio::OutputPin;

/// Low-power event classes a board may expose on trace pins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(usize)]
pub enum TraceEvent {
    /// Entering the low-power manager
    LowPowerEntry,
    /// Leaving the low-power manager
    LowPowerExit,
    /// CPU in wait mode
    Wait,
    /// CPU in stop mode
    Stop,
    /// CPU in very-low-power stop
    VeryLowPowerStop,
    /// CPU in low-leakage stop
    LowLeakageStop,
}

impl TraceEvent {
    /// Number of event classes
    pub const COUNT: usize = 6;

    fn index(self) -> usize {
        self as usize
    }
}

/// The board's set of attached trace pins
pub struct TracePins<P: OutputPin> {
    pins: [Option<P>; TraceEvent::COUNT],
}

impl<P: OutputPin> TracePins<P> {
    /// A set with no pins attached
    pub fn new() -> Self {
        Self {
            pins: [None, None, None, None, None, None],
        }
    }

    /// Attach a pin to an event class, driving it low
    ///
    /// Returns the previously attached pin, if any.
    pub fn attach(&mut self, event: TraceEvent, mut pin: P) -> Option<P> {
        pin.set_low();
        self.pins[event.index()].replace(pin)
    }

    /// Whether an event class has a pin attached
    pub fn is_attached(&self, event: TraceEvent) -> bool {
        self.pins[event.index()].is_some()
    }

    /// Drive an event's pin high; no-op when unattached
    pub fn raise(&mut self, event: TraceEvent) {
        if let Some(pin) = self.pins[event.index()].as_mut() {
            pin.set_high();
        }
    }

    /// Drive an event's pin low; no-op when unattached
    pub fn lower(&mut self, event: TraceEvent) {
        if let Some(pin) = self.pins[event.index()].as_mut() {
            pin.set_low();
        }
    }
}

impl<P: OutputPin> Default for TracePins<P> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use themelion_hal_sim::{Journal, SimPin};

    #[test]
    fn test_attach_drives_low() {
        let journal = Journal::new();
        let mut trace = TracePins::new();

        trace.attach(
            TraceEvent::LowPowerEntry,
            SimPin::with_level("trace-lpm-entry", &journal, true),
        );

        assert!(trace.is_attached(TraceEvent::LowPowerEntry));
        assert_eq!(journal.pin_level("trace-lpm-entry"), Some(false));
    }

    #[test]
    fn test_raise_and_lower() {
        let journal = Journal::new();
        let mut trace = TracePins::new();
        trace.attach(TraceEvent::Wait, SimPin::new("trace-wait", &journal));

        trace.raise(TraceEvent::Wait);
        assert_eq!(journal.pin_level("trace-wait"), Some(true));

        trace.lower(TraceEvent::Wait);
        assert_eq!(journal.pin_level("trace-wait"), Some(false));
    }

    #[test]
    fn test_unattached_event_is_silent() {
        let journal = Journal::new();
        let mut trace: TracePins<SimPin> = TracePins::new();

        trace.raise(TraceEvent::Stop);
        trace.lower(TraceEvent::Stop);

        assert!(!trace.is_attached(TraceEvent::Stop));
        assert!(journal.is_empty());
    }

    #[test]
    fn test_events_are_independent() {
        let journal = Journal::new();
        let mut trace = TracePins::new();
        trace.attach(TraceEvent::Stop, SimPin::new("trace-stop", &journal));
        trace.attach(
            TraceEvent::LowLeakageStop,
            SimPin::new("trace-lls", &journal),
        );

        trace.raise(TraceEvent::Stop);
        assert_eq!(journal.pin_level("trace-stop"), Some(true));
        assert_eq!(journal.pin_level("trace-lls"), Some(false));
    }
}
