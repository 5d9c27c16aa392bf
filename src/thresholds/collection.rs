//! Threshold collections.
//!
//! A collection pairs a shared, ordered list of threshold definitions with
//! this entity's private hysteresis table, indexed in parallel.

use std::sync::Arc;

use crate::damage::DamageLedger;

use super::{Evaluation, Threshold, ThresholdState};

/// Shared, ordered threshold definitions for one prototype.
pub type ThresholdSet = Arc<[Threshold]>;

/// One entity's thresholds.
///
/// Authoring order is evaluation order and firing order. Definitions are
/// never mutated; only `states` changes.
#[derive(Clone, Debug)]
pub struct ThresholdCollection {
    definitions: ThresholdSet,
    states: Vec<ThresholdState>,
}

impl ThresholdCollection {
    /// Build a collection with fresh (unarmed, never fired) states.
    pub fn new(definitions: ThresholdSet) -> Self {
        let states = definitions.iter().map(ThresholdState::for_threshold).collect();
        Self { definitions, states }
    }

    /// Build a collection from owned thresholds.
    pub fn from_thresholds(thresholds: impl IntoIterator<Item = Threshold>) -> Self {
        Self::new(thresholds.into_iter().collect::<Vec<_>>().into())
    }

    /// The shared definitions.
    #[must_use]
    pub fn definitions(&self) -> &ThresholdSet {
        &self.definitions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Threshold> {
        self.definitions.get(index)
    }

    /// This instance's state for one threshold.
    #[must_use]
    pub fn state(&self, index: usize) -> Option<ThresholdState> {
        self.states.get(index).copied()
    }

    /// Iterate `(index, definition, state)` in collection order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Threshold, &ThresholdState)> {
        self.definitions
            .iter()
            .zip(&self.states)
            .enumerate()
            .map(|(i, (t, s))| (i, t, s))
    }

    /// Evaluate one threshold against a ledger.
    ///
    /// Out-of-range indices never fire.
    pub fn evaluate<L: DamageLedger + ?Sized>(&mut self, index: usize, ledger: &L) -> Evaluation {
        match (self.definitions.get(index), self.states.get_mut(index)) {
            (Some(threshold), Some(state)) => threshold.evaluate(state, ledger),
            _ => Evaluation::NotFired,
        }
    }

    // === Debug / admin surface ===

    /// Override this instance's one-shot flag. Returns false if out of range.
    pub fn set_one_shot(&mut self, index: usize, one_shot: bool) -> bool {
        self.with_state(index, |s| s.one_shot = one_shot)
    }

    /// Override the armed bit. Returns false if out of range.
    pub fn set_armed(&mut self, index: usize, armed: bool) -> bool {
        self.with_state(index, |s| s.armed = armed)
    }

    /// Override the ever-fired bit. Returns false if out of range.
    pub fn set_ever_fired(&mut self, index: usize, ever_fired: bool) -> bool {
        self.with_state(index, |s| s.ever_fired = ever_fired)
    }

    /// Set the one-shot flag on every threshold.
    pub fn set_all_one_shot(&mut self, one_shot: bool) {
        for state in &mut self.states {
            state.one_shot = one_shot;
        }
    }

    fn with_state(&mut self, index: usize, f: impl FnOnce(&mut ThresholdState)) -> bool {
        match self.states.get_mut(index) {
            Some(state) => {
                f(state);
                true
            }
            None => false,
        }
    }
}
