//! Damage triggers.
//!
//! A trigger is a pure predicate over a damage ledger. The variant set is
//! closed: total damage, one damage type, one damage group, or a
//! conjunction of other triggers.

use serde::{Deserialize, Serialize};

use crate::core::{DamageGroupId, DamageTypeId};
use crate::damage::DamageLedger;

/// A condition over an entity's accumulated damage.
///
/// Triggers are immutable once built and are shared by every entity of a
/// prototype. Evaluation never mutates the ledger and never fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trigger {
    /// Total damage is at least `amount`.
    Total { amount: i64 },

    /// Damage of one type is at least `amount`.
    ByType {
        damage_type: DamageTypeId,
        amount: i64,
    },

    /// Summed damage of a group's types is at least `amount`.
    ByGroup { group: DamageGroupId, amount: i64 },

    /// All children are true. An empty list is vacuously true.
    And(Vec<Trigger>),
}

impl Trigger {
    /// Create a total-damage trigger.
    pub fn total(amount: i64) -> Self {
        Self::Total { amount }
    }

    /// Create a per-type trigger.
    pub fn by_type(damage_type: DamageTypeId, amount: i64) -> Self {
        Self::ByType { damage_type, amount }
    }

    /// Create a per-group trigger.
    pub fn by_group(group: DamageGroupId, amount: i64) -> Self {
        Self::ByGroup { group, amount }
    }

    /// Create an AND trigger.
    pub fn all(children: impl IntoIterator<Item = Trigger>) -> Self {
        Self::And(children.into_iter().collect())
    }

    /// Add another trigger with AND.
    pub fn and(self, other: Trigger) -> Self {
        match self {
            Self::And(mut children) => {
                children.push(other);
                Self::And(children)
            }
            _ => Self::And(vec![self, other]),
        }
    }

    /// Check the trigger against a ledger.
    pub fn evaluate<L: DamageLedger + ?Sized>(&self, ledger: &L) -> bool {
        match self {
            Trigger::Total { amount } => ledger.total_damage() >= *amount,

            Trigger::ByType { damage_type, amount } => {
                ledger.amount_of_type(*damage_type) >= *amount
            }

            Trigger::ByGroup { group, amount } => ledger.amount_of_group(*group) >= *amount,

            Trigger::And(children) => children.iter().all(|c| c.evaluate(ledger)),
        }
    }

    /// The amount for a total-damage trigger, if this is one.
    #[must_use]
    pub fn total_amount(&self) -> Option<i64> {
        match self {
            Trigger::Total { amount } => Some(*amount),
            _ => None,
        }
    }

    /// True when this trigger is satisfied by an undamaged ledger.
    ///
    /// Such triggers are almost always authoring mistakes (an empty `And`
    /// or a non-positive amount); the loader warns about them.
    #[must_use]
    pub fn is_trivially_true(&self) -> bool {
        match self {
            Trigger::Total { amount }
            | Trigger::ByType { amount, .. }
            | Trigger::ByGroup { amount, .. } => *amount <= 0,
            Trigger::And(children) => children.iter().all(Trigger::is_trivially_true),
        }
    }
}
