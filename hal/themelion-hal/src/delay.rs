//! Busy-wait delay abstraction
//!
//! Early bring-up cannot use time-based delays: until the FLL has settled
//! the core clock is not trustworthy, so the only honest unit is "CPU
//! cycles executed". [`Delay::delay_cycles`] covers that window;
//! [`Delay::delay_us`] becomes meaningful once the core-clock cache has
//! been recomputed.

/// Blocking busy-wait delays
pub trait Delay {
    /// Spin for a fixed number of no-op iterations
    ///
    /// The wall-clock duration depends on the (possibly still unstable)
    /// core clock. Used for stabilization waits where only a lower bound
    /// matters.
    fn delay_cycles(&mut self, cycles: u32);

    /// Spin for at least `us` microseconds
    ///
    /// Requires a trustworthy core clock; callers must not use this before
    /// the clock-settle milestone.
    fn delay_us(&mut self, us: u32);
}
