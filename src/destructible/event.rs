//! Events published by the destructible system.

use crate::behaviors::{Behavior, BehaviorResult, WorldError};
use crate::core::EntityId;
use crate::thresholds::{Threshold, ThresholdSet};
use crate::triggers::Trigger;

/// Published once per threshold firing.
///
/// Carries the shared definitions so listeners can inspect the fired
/// threshold's trigger and behaviors without copying them.
#[derive(Clone, Debug)]
pub struct ThresholdReached {
    /// The entity owning the threshold.
    pub entity: EntityId,
    /// Position of the threshold in the entity's collection.
    pub index: usize,
    thresholds: ThresholdSet,
}

impl ThresholdReached {
    pub(crate) fn new(entity: EntityId, index: usize, thresholds: ThresholdSet) -> Self {
        debug_assert!(index < thresholds.len());
        Self {
            entity,
            index,
            thresholds,
        }
    }

    /// The threshold that fired.
    #[must_use]
    pub fn threshold(&self) -> &Threshold {
        &self.thresholds[self.index]
    }

    #[must_use]
    pub fn trigger(&self) -> &Trigger {
        &self.threshold().trigger
    }

    #[must_use]
    pub fn behaviors(&self) -> &[Behavior] {
        &self.threshold().behaviors
    }
}

/// Behavior results of one fired threshold.
#[derive(Clone, Debug, PartialEq)]
pub struct FiredThreshold {
    pub index: usize,
    pub results: Vec<BehaviorResult>,
}

/// Report of one evaluation pass over an entity's thresholds.
#[derive(Clone, Debug)]
pub struct EvaluationPass {
    pub entity: EntityId,
    /// Events published, in firing order.
    pub reached: Vec<ThresholdReached>,
    /// Behavior results for each fired threshold, in firing order.
    pub fired: Vec<FiredThreshold>,
    /// The entity was destroyed during this pass.
    pub destroyed: bool,
}

impl EvaluationPass {
    pub(crate) fn empty(entity: EntityId) -> Self {
        Self {
            entity,
            reached: Vec::new(),
            fired: Vec::new(),
            destroyed: false,
        }
    }

    /// Indices of fired thresholds, in firing order.
    pub fn fired_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.fired.iter().map(|f| f.index)
    }

    /// Every world error reported by a behavior during the pass.
    pub fn failures(&self) -> impl Iterator<Item = &WorldError> {
        self.fired
            .iter()
            .flat_map(|f| &f.results)
            .filter_map(|r| match r {
                BehaviorResult::Failed(errors) => Some(errors.iter()),
                _ => None,
            })
            .flatten()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reached.is_empty()
    }
}
