//! Damage ledgers.
//!
//! The ledger is the read-only view triggers evaluate against. `DamageState`
//! is the in-memory implementation used by `DamageableStore`; hosts with
//! their own bookkeeping implement `DamageLedger` directly.

use std::sync::Arc;

use im::OrdMap;

use crate::core::{DamageCatalog, DamageGroupId, DamageTypeId};

use super::DamageSpecifier;

/// Read-only damage queries for one entity.
pub trait DamageLedger {
    /// Sum of all per-type amounts.
    fn total_damage(&self) -> i64;

    /// Current amount of one damage type (zero when untouched).
    fn amount_of_type(&self, damage_type: DamageTypeId) -> i64;

    /// Sum of the amounts of every type in a group.
    fn amount_of_group(&self, group: DamageGroupId) -> i64;
}

/// Per-entity damage amounts.
///
/// Amounts live in an `im::OrdMap` so cloning is O(1) and clones never
/// observe later mutations. Amounts never go below zero and saturate at
/// `i64::MAX`; so do the total and group sums.
///
/// ```
/// use std::sync::Arc;
/// use destructible::core::DamageCatalog;
/// use destructible::damage::{DamageLedger, DamageSpecifier, DamageState};
///
/// let catalog = Arc::new(DamageCatalog::new().with_group("Brute", ["Blunt", "Slash"]));
/// let blunt = catalog.type_id("Blunt").unwrap();
/// let brute = catalog.group_id("Brute").unwrap();
///
/// let mut state = DamageState::new(catalog);
/// state.apply(&DamageSpecifier::single(blunt, 12));
///
/// assert_eq!(state.total_damage(), 12);
/// assert_eq!(state.amount_of_group(brute), 12);
/// ```
#[derive(Clone, Debug)]
pub struct DamageState {
    catalog: Arc<DamageCatalog>,
    amounts: OrdMap<DamageTypeId, i64>,
    // Wider than any single amount so the sum of saturated types stays exact.
    total: i128,
}

impl DamageState {
    /// Create an undamaged ledger.
    pub fn new(catalog: Arc<DamageCatalog>) -> Self {
        Self {
            catalog,
            amounts: OrdMap::new(),
            total: 0,
        }
    }

    /// The catalog groups are resolved against.
    #[must_use]
    pub fn catalog(&self) -> &Arc<DamageCatalog> {
        &self.catalog
    }

    /// Apply a specifier, clamping every type at zero.
    ///
    /// Returns true if any amount changed.
    pub fn apply(&mut self, spec: &DamageSpecifier) -> bool {
        let mut changed = false;
        for (damage_type, delta) in spec.iter() {
            let current = self.amount_of_type(damage_type);
            changed |= self.set_amount(damage_type, current.saturating_add(delta));
        }
        changed
    }

    /// Set one type's amount directly (clamped at zero).
    ///
    /// Returns true if the amount changed.
    pub fn set_amount(&mut self, damage_type: DamageTypeId, amount: i64) -> bool {
        let amount = amount.max(0);
        let current = self.amount_of_type(damage_type);
        if current == amount {
            return false;
        }

        if amount == 0 {
            self.amounts.remove(&damage_type);
        } else {
            self.amounts.insert(damage_type, amount);
        }
        self.total += i128::from(amount) - i128::from(current);
        true
    }

    /// Heal every type to zero. Returns true if anything was damaged.
    pub fn heal_all(&mut self) -> bool {
        if self.amounts.is_empty() {
            return false;
        }
        self.amounts = OrdMap::new();
        self.total = 0;
        true
    }

    /// Iterate damaged types in ID order.
    pub fn iter(&self) -> impl Iterator<Item = (DamageTypeId, i64)> + '_ {
        self.amounts.iter().map(|(&t, &a)| (t, a))
    }
}

impl DamageLedger for DamageState {
    fn total_damage(&self) -> i64 {
        i64::try_from(self.total).unwrap_or(i64::MAX)
    }

    fn amount_of_type(&self, damage_type: DamageTypeId) -> i64 {
        self.amounts.get(&damage_type).copied().unwrap_or(0)
    }

    fn amount_of_group(&self, group: DamageGroupId) -> i64 {
        self.catalog
            .group_members(group)
            .iter()
            .map(|&t| self.amount_of_type(t))
            .fold(0, i64::saturating_add)
    }
}
