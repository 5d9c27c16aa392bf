//! Damage specifiers.
//!
//! A specifier is a per-type delta applied to a ledger in one mutation.
//! Positive amounts deal damage, negative amounts heal.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::DamageTypeId;

/// A per-type damage (or healing) delta.
///
/// ```
/// use destructible::core::DamageTypeId;
/// use destructible::damage::DamageSpecifier;
///
/// const BLUNT: DamageTypeId = DamageTypeId::new(0);
/// const SLASH: DamageTypeId = DamageTypeId::new(1);
///
/// let hit = DamageSpecifier::new().with(BLUNT, 10).with(SLASH, 5);
/// assert_eq!(hit.total(), 15);
/// assert_eq!(hit.negated().total(), -15);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageSpecifier {
    entries: SmallVec<[(DamageTypeId, i64); 4]>,
}

impl DamageSpecifier {
    /// Create an empty specifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// A specifier for a single damage type.
    pub fn single(damage_type: DamageTypeId, amount: i64) -> Self {
        Self::new().with(damage_type, amount)
    }

    /// Healing of a single damage type (negated amount).
    pub fn heal(damage_type: DamageTypeId, amount: i64) -> Self {
        Self::single(damage_type, amount.saturating_neg())
    }

    /// Add an amount for a type (builder pattern).
    ///
    /// Amounts for the same type accumulate.
    #[must_use]
    pub fn with(mut self, damage_type: DamageTypeId, amount: i64) -> Self {
        self.add(damage_type, amount);
        self
    }

    /// Add an amount for a type.
    pub fn add(&mut self, damage_type: DamageTypeId, amount: i64) {
        if let Some(entry) = self.entries.iter_mut().find(|(t, _)| *t == damage_type) {
            entry.1 = entry.1.saturating_add(amount);
        } else {
            self.entries.push((damage_type, amount));
        }
    }

    /// The same specifier with every amount negated.
    #[must_use]
    pub fn negated(&self) -> Self {
        Self {
            entries: self.entries.iter().map(|&(t, a)| (t, a.saturating_neg())).collect(),
        }
    }

    /// Sum of all amounts.
    #[must_use]
    pub fn total(&self) -> i64 {
        self.entries.iter().fold(0, |sum, &(_, a)| sum.saturating_add(a))
    }

    /// Iterate `(type, amount)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (DamageTypeId, i64)> + '_ {
        self.entries.iter().copied()
    }

    /// True when no entry has a non-zero amount.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|(_, a)| *a == 0)
    }
}
