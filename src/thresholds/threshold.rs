//! Thresholds and their edge-detection state machine.
//!
//! A `Threshold` is shared, immutable configuration. Its mutable hysteresis
//! lives in a separate per-entity `ThresholdState`, so one threshold
//! definition can serve every entity of a prototype.

use serde::{Deserialize, Serialize};

use crate::behaviors::{Behavior, ThresholdActs};
use crate::damage::DamageLedger;
use crate::triggers::Trigger;

/// A trigger paired with the behaviors to execute when it fires.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    /// Condition checked on every damage change.
    pub trigger: Trigger,

    /// Behaviors executed, in order, when the threshold fires.
    pub behaviors: Vec<Behavior>,

    /// Authored one-shot flag. Copied into each instance's state.
    pub triggers_once: bool,
}

impl Threshold {
    /// Create a repeatable threshold with no behaviors.
    pub fn new(trigger: Trigger) -> Self {
        Self {
            trigger,
            behaviors: Vec::new(),
            triggers_once: false,
        }
    }

    /// Add a behavior (builder pattern).
    #[must_use]
    pub fn with_behavior(mut self, behavior: Behavior) -> Self {
        self.behaviors.push(behavior);
        self
    }

    /// Mark as one-shot (builder pattern).
    #[must_use]
    pub fn once(mut self) -> Self {
        self.triggers_once = true;
        self
    }

    /// Does any behavior apply the given act?
    #[must_use]
    pub fn has_act(&self, act: ThresholdActs) -> bool {
        self.behaviors
            .iter()
            .any(|b| matches!(b, Behavior::DoActs { acts } if acts.contains(act)))
    }

    /// Evaluate against a ledger, updating this instance's state.
    pub fn evaluate<L: DamageLedger + ?Sized>(
        &self,
        state: &mut ThresholdState,
        ledger: &L,
    ) -> Evaluation {
        state.update(self.trigger.evaluate(ledger))
    }
}

/// Outcome of one threshold evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Evaluation {
    /// Rising edge: execute behaviors and publish.
    Fired,
    NotFired,
}

impl Evaluation {
    #[must_use]
    pub fn fired(self) -> bool {
        self == Self::Fired
    }
}

/// Per-instance hysteresis for one threshold.
///
/// - `armed`: the condition has held continuously since the last fire.
///   Cleared by any evaluation that finds the condition false.
/// - `ever_fired`: sticky; set on the first fire and never cleared.
/// - `one_shot`: this instance's one-shot flag, initialised from
///   [`Threshold::triggers_once`].
///
/// A fire happens iff the condition holds, the state was not armed on
/// entry, and not (`one_shot` and `ever_fired`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdState {
    pub armed: bool,
    pub ever_fired: bool,
    pub one_shot: bool,
}

impl ThresholdState {
    /// Fresh state for an instance of `threshold`.
    #[must_use]
    pub fn for_threshold(threshold: &Threshold) -> Self {
        Self {
            armed: false,
            ever_fired: false,
            one_shot: threshold.triggers_once,
        }
    }

    /// Advance the state machine given the trigger's current value.
    pub fn update(&mut self, condition: bool) -> Evaluation {
        if !condition {
            self.armed = false;
            return Evaluation::NotFired;
        }

        if self.armed {
            return Evaluation::NotFired;
        }

        if self.one_shot && self.ever_fired {
            return Evaluation::NotFired;
        }

        self.armed = true;
        self.ever_fired = true;
        Evaluation::Fired
    }

    /// True once a one-shot instance can never fire again.
    #[must_use]
    pub fn is_spent(&self) -> bool {
        self.one_shot && self.ever_fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_on_rising_edge_only() {
        let mut state = ThresholdState::default();

        assert_eq!(state.update(false), Evaluation::NotFired);
        assert_eq!(state.update(true), Evaluation::Fired);
        assert_eq!(state.update(true), Evaluation::NotFired);
        assert_eq!(state.update(true), Evaluation::NotFired);
    }

    #[test]
    fn test_falling_edge_rearms_without_firing() {
        let mut state = ThresholdState::default();

        state.update(true);
        assert!(state.armed);

        assert_eq!(state.update(false), Evaluation::NotFired);
        assert!(!state.armed);
        assert!(state.ever_fired);

        assert_eq!(state.update(true), Evaluation::Fired);
    }

    #[test]
    fn test_one_shot_fires_once() {
        let threshold = Threshold::new(Trigger::total(10)).once();
        let mut state = ThresholdState::for_threshold(&threshold);
        assert!(state.one_shot);

        assert!(state.update(true).fired());
        for _ in 0..10 {
            assert!(!state.update(false).fired());
            assert!(!state.update(true).fired());
        }
        assert!(state.is_spent());
    }

    #[test]
    fn test_one_shot_condition_false_still_disarms() {
        let mut state = ThresholdState {
            one_shot: true,
            ..ThresholdState::default()
        };

        state.update(true);
        state.update(false);
        assert!(!state.armed);
    }

    #[test]
    fn test_one_shot_set_after_fire_blocks_refire() {
        let mut state = ThresholdState::default();

        assert!(state.update(true).fired());
        state.update(false);

        state.one_shot = true;
        assert!(!state.update(true).fired());
    }

    #[test]
    fn test_spent_instance_stays_unarmed() {
        let mut state = ThresholdState::default();
        assert!(state.update(true).fired());
        state.update(false);

        state.one_shot = true;
        assert!(!state.update(true).fired());
        assert!(!state.armed);

        // Clearing one-shot lets the still-pending edge fire.
        state.one_shot = false;
        assert!(state.update(true).fired());
        assert!(state.armed);
    }

    #[test]
    fn test_toggling_one_shot_does_not_reset_ever_fired() {
        let mut state = ThresholdState {
            one_shot: true,
            ..ThresholdState::default()
        };

        assert!(state.update(true).fired());
        state.update(false);

        state.one_shot = false;
        state.one_shot = true;
        assert!(state.ever_fired);
        assert!(!state.update(true).fired());
    }

    #[test]
    fn test_threshold_has_act() {
        let threshold = Threshold::new(Trigger::total(50))
            .with_behavior(Behavior::breakage())
            .with_behavior(Behavior::destruction());

        assert!(threshold.has_act(ThresholdActs::BREAKAGE));
        assert!(threshold.has_act(ThresholdActs::DESTRUCTION));
        assert!(!Threshold::new(Trigger::total(1)).has_act(ThresholdActs::DESTRUCTION));
    }
}
