//! Boot step sequencing engine
//!
//! Bring-up is a single ordered pass: each step names the milestones it
//! needs already reached and the milestones it guarantees afterwards. The
//! sequencer refuses to run a step whose preconditions are not met and
//! aborts the whole boot on the first failing step - there is no rollback,
//! a failed bring-up is fatal and the device must not reach application
//! code.

use heapless::Vec;
use themelion_hal::delay::Delay;

/// Maximum steps a sequencer can hold
pub const MAX_BOOT_STEPS: usize = 16;

/// A guarantee established by a boot step and relied on by later steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Milestone {
    /// Diagnostic LEDs initialized; later failures stay observable
    DiagObservable,
    /// RTC oscillator started (still stabilizing)
    RtcOscRunning,
    /// Conservative clock dividers programmed
    SafeDividers,
    /// FLL-external mode engaged and settle wait elapsed
    ClockStable,
    /// Cached core-clock frequency recomputed
    CoreClockCached,
    /// CPU post-clock initialization done
    CpuReady,
    /// Power rails initialized and early rails switched on
    RailsConfigured,
    /// Optional trace pins initialized
    TraceConfigured,
    /// Shared peripheral bus in master mode, all devices deselected
    BusReady,
    /// Unused devices driven to lowest power
    DevicesQuiesced,
    /// Low-power-mode subsystem initialized
    LowPowerConfigured,
}

impl Milestone {
    const fn mask(self) -> u16 {
        1 << self as u16
    }
}

/// Set of reached milestones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MilestoneSet {
    bits: u16,
}

impl MilestoneSet {
    /// Empty set
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    /// Mark a milestone reached
    pub fn insert(&mut self, m: Milestone) {
        self.bits |= m.mask();
    }

    /// Whether a milestone has been reached
    pub fn contains(&self, m: Milestone) -> bool {
        self.bits & m.mask() != 0
    }

    /// Forget everything (used when re-running from cold state)
    pub fn clear(&mut self) {
        self.bits = 0;
    }
}

/// Post-action stabilization wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Settle {
    /// No wait
    None,
    /// Fixed-iteration busy-spin; the only honest unit while the clock is
    /// not yet trustworthy
    Cycles(u32),
    /// Time-based wait; requires a trustworthy core clock
    Micros(u32),
}

/// Fatal bring-up failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootError {
    /// A step was about to run before one of its preconditions was
    /// established
    MilestoneMissing {
        /// Step that was refused
        step: &'static str,
        /// Milestone it needed
        missing: Milestone,
    },
    /// A step's action reported an unrecoverable failure
    StepFailed {
        /// Step that failed
        step: &'static str,
    },
    /// More than [`MAX_BOOT_STEPS`] steps pushed
    TooManySteps,
}

/// An ordered bring-up action
pub struct BootStep<H> {
    /// Step name, used in errors and the completion record
    pub name: &'static str,
    /// Milestones that must be reached before this step may run
    pub requires: &'static [Milestone],
    /// Milestones guaranteed once this step (and its settle wait) is done
    pub provides: &'static [Milestone],
    /// The action itself
    pub action: fn(&mut H) -> Result<(), BootError>,
    /// Stabilization wait after the action
    pub settle: Settle,
}

/// Ordered boot step executor
///
/// Steps run strictly in push order. `provides` milestones are recorded
/// only after the settle wait elapses, so a step downstream of a
/// stabilization window cannot observe the milestone early.
pub struct Sequencer<H> {
    steps: Vec<BootStep<H>, MAX_BOOT_STEPS>,
    reached: MilestoneSet,
    completed: Vec<&'static str, MAX_BOOT_STEPS>,
}

impl<H> Sequencer<H> {
    /// Create an empty sequencer
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            reached: MilestoneSet::new(),
            completed: Vec::new(),
        }
    }

    /// Append a step
    pub fn push(&mut self, step: BootStep<H>) -> Result<(), BootError> {
        self.steps.push(step).map_err(|_| BootError::TooManySteps)
    }

    /// Execute all steps in order
    ///
    /// Clears any record from a previous pass first, so re-running from a
    /// cold hardware state behaves identically both times.
    pub fn run<D: Delay>(&mut self, hw: &mut H, delay: &mut D) -> Result<(), BootError> {
        self.reached.clear();
        self.completed.clear();

        for i in 0..self.steps.len() {
            let step = &self.steps[i];

            for &m in step.requires {
                if !self.reached.contains(m) {
                    return Err(BootError::MilestoneMissing {
                        step: step.name,
                        missing: m,
                    });
                }
            }

            (step.action)(hw)?;

            match step.settle {
                Settle::None => {}
                Settle::Cycles(n) => delay.delay_cycles(n),
                Settle::Micros(us) => delay.delay_us(us),
            }

            for &m in step.provides {
                self.reached.insert(m);
            }
            // cannot overflow: completed is bounded by the steps vec
            let _ = self.completed.push(step.name);
        }

        Ok(())
    }

    /// Whether a milestone was reached during the last run
    pub fn reached(&self, m: Milestone) -> bool {
        self.reached.contains(m)
    }

    /// Names of the steps completed during the last run, in order
    pub fn completed(&self) -> &[&'static str] {
        &self.completed
    }
}

impl<H> Default for Sequencer<H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use themelion_hal_sim::{Journal, Op, SimDelay};

    /// Call-recording stand-in for board hardware
    #[derive(Default)]
    struct Rig {
        calls: Vec<&'static str, 8>,
    }

    fn step(
        name: &'static str,
        requires: &'static [Milestone],
        provides: &'static [Milestone],
    ) -> BootStep<Rig> {
        BootStep {
            name,
            requires,
            provides,
            action: |_| Ok(()),
            settle: Settle::None,
        }
    }

    #[test]
    fn test_steps_run_in_push_order() {
        let mut seq: Sequencer<Rig> = Sequencer::new();
        seq.push(step("first", &[], &[Milestone::DiagObservable]))
            .unwrap();
        seq.push(step("second", &[Milestone::DiagObservable], &[]))
            .unwrap();

        let journal = Journal::new();
        let mut delay = SimDelay::new(&journal);
        let mut rig = Rig::default();

        seq.run(&mut rig, &mut delay).unwrap();
        assert_eq!(seq.completed(), &["first", "second"]);
    }

    #[test]
    fn test_unmet_precondition_aborts() {
        let mut seq: Sequencer<Rig> = Sequencer::new();
        seq.push(step("eager", &[Milestone::BusReady], &[])).unwrap();
        seq.push(step("never-runs", &[], &[])).unwrap();

        let journal = Journal::new();
        let mut delay = SimDelay::new(&journal);
        let mut rig = Rig::default();

        let err = seq.run(&mut rig, &mut delay).unwrap_err();
        assert_eq!(
            err,
            BootError::MilestoneMissing {
                step: "eager",
                missing: Milestone::BusReady,
            }
        );
        assert!(seq.completed().is_empty());
    }

    #[test]
    fn test_failing_action_aborts_remaining_steps() {
        let mut seq: Sequencer<Rig> = Sequencer::new();
        seq.push(step("ok", &[], &[])).unwrap();
        seq.push(BootStep {
            name: "broken",
            requires: &[],
            provides: &[],
            action: |_| Err(BootError::StepFailed { step: "broken" }),
            settle: Settle::None,
        })
        .unwrap();
        seq.push(step("after", &[], &[])).unwrap();

        let journal = Journal::new();
        let mut delay = SimDelay::new(&journal);
        let mut rig = Rig::default();

        let err = seq.run(&mut rig, &mut delay).unwrap_err();
        assert_eq!(err, BootError::StepFailed { step: "broken" });
        assert_eq!(seq.completed(), &["ok"]);
    }

    #[test]
    fn test_settle_runs_between_action_and_milestone() {
        let mut seq: Sequencer<Rig> = Sequencer::new();
        seq.push(BootStep {
            name: "engage",
            requires: &[],
            provides: &[Milestone::ClockStable],
            action: |rig: &mut Rig| {
                let _ = rig.calls.push("engage");
                Ok(())
            },
            settle: Settle::Cycles(100_000),
        })
        .unwrap();

        let journal = Journal::new();
        let mut delay = SimDelay::new(&journal);
        let mut rig = Rig::default();

        seq.run(&mut rig, &mut delay).unwrap();
        assert!(seq.reached(Milestone::ClockStable));
        journal.with(|ops| assert_eq!(ops, &[Op::DelayCycles(100_000)]));
    }

    #[test]
    fn test_rerun_is_repeatable() {
        let mut seq: Sequencer<Rig> = Sequencer::new();
        seq.push(step("only", &[], &[Milestone::CpuReady])).unwrap();

        let journal = Journal::new();
        let mut delay = SimDelay::new(&journal);
        let mut rig = Rig::default();

        seq.run(&mut rig, &mut delay).unwrap();
        seq.run(&mut rig, &mut delay).unwrap();
        assert_eq!(seq.completed(), &["only"]);
        assert!(seq.reached(Milestone::CpuReady));
    }

    #[test]
    fn test_step_capacity_bounded() {
        let mut seq: Sequencer<Rig> = Sequencer::new();
        for _ in 0..MAX_BOOT_STEPS {
            seq.push(step("filler", &[], &[])).unwrap();
        }
        assert_eq!(
            seq.push(step("overflow", &[], &[])),
            Err(BootError::TooManySteps)
        );
    }
}
