//! Boot sequencing
//!
//! The engine ([`sequencer`]) executes an ordered list of steps, checking
//! milestone preconditions and applying post-action settle waits. The
//! standard board program ([`program`]) instantiates it with the fixed
//! power/clock/peripheral bring-up order.

pub mod program;
pub mod sequencer;

pub use program::{standard_sequence, CLOCK_SETTLE_CYCLES};
pub use sequencer::{
    BootError, BootStep, Milestone, MilestoneSet, Sequencer, Settle, MAX_BOOT_STEPS,
};
