//! Damageable store and the damage-changed notification.
//!
//! The store owns one `DamageState` per damageable entity. Every mutation
//! that actually changes a ledger returns a `DamageChanged` notification;
//! the host routes it to whoever subscribes (normally the destructible
//! system). No-op mutations return `None`.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{DamageCatalog, DamageTypeId, EntityId};

use super::{DamageLedger, DamageSpecifier, DamageState};

/// Raised after any damage-mutating operation completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageChanged {
    /// The entity whose ledger changed.
    pub entity: EntityId,
    /// Change in total damage caused by the mutation.
    pub delta_total: i64,
}

/// Per-entity damage ledgers.
#[derive(Clone, Debug)]
pub struct DamageableStore {
    catalog: Arc<DamageCatalog>,
    ledgers: FxHashMap<EntityId, DamageState>,
}

impl DamageableStore {
    pub fn new(catalog: Arc<DamageCatalog>) -> Self {
        Self {
            catalog,
            ledgers: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Arc<DamageCatalog> {
        &self.catalog
    }

    /// Give an entity an undamaged ledger. Existing ledgers are kept.
    pub fn insert(&mut self, entity: EntityId) {
        let catalog = &self.catalog;
        self.ledgers
            .entry(entity)
            .or_insert_with(|| DamageState::new(Arc::clone(catalog)));
    }

    /// Drop an entity's ledger.
    pub fn remove(&mut self, entity: EntityId) -> Option<DamageState> {
        self.ledgers.remove(&entity)
    }

    #[must_use]
    pub fn get(&self, entity: EntityId) -> Option<&DamageState> {
        self.ledgers.get(&entity)
    }

    #[must_use]
    pub fn contains(&self, entity: EntityId) -> bool {
        self.ledgers.contains_key(&entity)
    }

    /// Apply a damage or healing specifier.
    pub fn change_damage(
        &mut self,
        entity: EntityId,
        spec: &DamageSpecifier,
    ) -> Option<DamageChanged> {
        self.mutate(entity, |state| state.apply(spec))
    }

    /// Set one type's amount directly.
    pub fn set_damage(
        &mut self,
        entity: EntityId,
        damage_type: DamageTypeId,
        amount: i64,
    ) -> Option<DamageChanged> {
        self.mutate(entity, |state| state.set_amount(damage_type, amount))
    }

    /// Heal every damage type to zero.
    pub fn heal_all(&mut self, entity: EntityId) -> Option<DamageChanged> {
        self.mutate(entity, DamageState::heal_all)
    }

    fn mutate(
        &mut self,
        entity: EntityId,
        f: impl FnOnce(&mut DamageState) -> bool,
    ) -> Option<DamageChanged> {
        let state = self.ledgers.get_mut(&entity)?;
        let before = state.total_damage();
        if !f(state) {
            return None;
        }
        Some(DamageChanged {
            entity,
            delta_total: state.total_damage() - before,
        })
    }
}
