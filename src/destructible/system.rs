//! The evaluation driver.
//!
//! `DestructibleSystem` is the single subscriber to [`DamageChanged`]. Each
//! notification runs one synchronous pass over the entity's thresholds:
//! evaluate in order, execute fired behaviors in order, publish.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::{debug, debug_span, trace};

use crate::behaviors::{BehaviorExecutor, DestructibleWorld, ThresholdActs};
use crate::core::{EntityId, SimRng};
use crate::damage::{DamageChanged, DamageLedger};
use crate::thresholds::ThresholdCollection;

use super::{EvaluationPass, FiredThreshold, ThresholdReached};

/// Owns every entity's threshold collection and drives evaluation.
#[derive(Clone, Debug)]
pub struct DestructibleSystem {
    collections: FxHashMap<EntityId, ThresholdCollection>,
    rng: SimRng,
}

impl DestructibleSystem {
    /// Create a system. `rng` feeds spawn counts and scatter.
    pub fn new(rng: SimRng) -> Self {
        Self {
            collections: FxHashMap::default(),
            rng,
        }
    }

    /// Attach a threshold collection to an entity, replacing any previous one.
    pub fn insert(&mut self, entity: EntityId, collection: ThresholdCollection) {
        self.collections.insert(entity, collection);
    }

    /// Detach an entity's thresholds.
    pub fn remove(&mut self, entity: EntityId) -> Option<ThresholdCollection> {
        self.collections.remove(&entity)
    }

    #[must_use]
    pub fn get(&self, entity: EntityId) -> Option<&ThresholdCollection> {
        self.collections.get(&entity)
    }

    /// Mutable access, for the debug surface.
    pub fn get_mut(&mut self, entity: EntityId) -> Option<&mut ThresholdCollection> {
        self.collections.get_mut(&entity)
    }

    #[must_use]
    pub fn contains(&self, entity: EntityId) -> bool {
        self.collections.contains_key(&entity)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.collections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    /// Handle a damage-changed notification.
    ///
    /// Every threshold is evaluated in collection order; fired thresholds
    /// execute their behaviors before the next threshold is evaluated. If a
    /// behavior destroys the entity the pass stops and the entity's
    /// collection is dropped.
    pub fn on_damage_changed<L, W>(
        &mut self,
        changed: &DamageChanged,
        ledger: &L,
        world: &mut W,
    ) -> EvaluationPass
    where
        L: DamageLedger + ?Sized,
        W: DestructibleWorld + ?Sized,
    {
        self.on_damage_changed_with(changed, ledger, world, |_| {})
    }

    /// Like [`Self::on_damage_changed`], handing each event to `publish` as
    /// soon as its threshold's behaviors have run.
    pub fn on_damage_changed_with<L, W>(
        &mut self,
        changed: &DamageChanged,
        ledger: &L,
        world: &mut W,
        mut publish: impl FnMut(&ThresholdReached),
    ) -> EvaluationPass
    where
        L: DamageLedger + ?Sized,
        W: DestructibleWorld + ?Sized,
    {
        let entity = changed.entity;
        let mut pass = EvaluationPass::empty(entity);

        if !world.exists(entity) {
            self.collections.remove(&entity);
            return pass;
        }

        let Some(collection) = self.collections.get_mut(&entity) else {
            return pass;
        };

        let _span = debug_span!("threshold_pass", %entity, delta = changed.delta_total).entered();
        let definitions = Arc::clone(collection.definitions());

        for index in 0..definitions.len() {
            let evaluation = collection.evaluate(index, ledger);
            trace!(index, ?evaluation, "evaluated threshold");
            if !evaluation.fired() {
                continue;
            }

            let threshold = &definitions[index];
            let results =
                BehaviorExecutor::execute_all(&threshold.behaviors, entity, world, &mut self.rng);
            debug!(index, behaviors = threshold.behaviors.len(), "threshold reached");

            pass.fired.push(FiredThreshold { index, results });
            let reached = ThresholdReached::new(entity, index, Arc::clone(&definitions));
            publish(&reached);
            pass.reached.push(reached);

            if !world.exists(entity) {
                pass.destroyed = true;
                break;
            }
        }

        debug!(fired = pass.fired.len(), destroyed = pass.destroyed, "threshold pass complete");
        if pass.destroyed {
            debug!("entity destroyed, dropping thresholds");
            self.collections.remove(&entity);
        }

        pass
    }

    /// Total damage at which the entity is destroyed.
    ///
    /// The smallest total-damage amount among thresholds whose behaviors
    /// include the destruction act. `None` if no such threshold exists
    /// (including thresholds destroyed by type or group triggers only).
    #[must_use]
    pub fn destroyed_at(&self, entity: EntityId) -> Option<i64> {
        self.collections.get(&entity)?
            .definitions()
            .iter()
            .filter(|t| t.has_act(ThresholdActs::DESTRUCTION))
            .filter_map(|t| t.trigger.total_amount())
            .min()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::behaviors::{Behavior, BehaviorResult, SoundSpecifier, SpawnRange, WorldError};
    use crate::core::{DamageCatalog, DamageTypeId, Position, PrototypeId};
    use crate::damage::{DamageSpecifier, DamageState};
    use crate::thresholds::Threshold;
    use crate::triggers::Trigger;

    const ENTITY: EntityId = EntityId(1);

    #[derive(Default)]
    struct TestWorld {
        alive: bool,
        journal: Rc<RefCell<Vec<String>>>,
        sounds: usize,
        spawned: Vec<PrototypeId>,
        broken: usize,
    }

    impl DestructibleWorld for TestWorld {
        fn exists(&self, entity: EntityId) -> bool {
            entity == ENTITY && self.alive
        }

        fn position(&self, entity: EntityId) -> Option<Position> {
            self.exists(entity).then_some(Position::ORIGIN)
        }

        fn play_sound(&mut self, sound: &SoundSpecifier, _at: Position) {
            self.sounds += 1;
            self.journal.borrow_mut().push(sound.to_string());
        }

        fn spawn(&mut self, prototype: &PrototypeId, _at: Position) -> Result<EntityId, WorldError> {
            self.spawned.push(prototype.clone());
            Ok(EntityId(100 + self.spawned.len() as u32))
        }

        fn break_entity(&mut self, _entity: EntityId) -> Result<(), WorldError> {
            self.broken += 1;
            Ok(())
        }

        fn destroy_entity(&mut self, _entity: EntityId) -> Result<(), WorldError> {
            self.alive = false;
            Ok(())
        }
    }

    struct Harness {
        system: DestructibleSystem,
        ledger: DamageState,
        world: TestWorld,
        blunt: DamageTypeId,
    }

    impl Harness {
        fn new(thresholds: Vec<Threshold>) -> Self {
            let catalog = Arc::new(DamageCatalog::new().with_type("Blunt"));
            let blunt = catalog.type_id("Blunt").unwrap();
            let mut system = DestructibleSystem::new(SimRng::new(3));
            system.insert(ENTITY, ThresholdCollection::from_thresholds(thresholds));
            Self {
                system,
                ledger: DamageState::new(catalog),
                world: TestWorld {
                    alive: true,
                    ..TestWorld::default()
                },
                blunt,
            }
        }

        fn damage(&mut self, amount: i64) -> EvaluationPass {
            let before = self.ledger.total_damage();
            self.ledger.apply(&DamageSpecifier::single(self.blunt, amount));
            let changed = DamageChanged {
                entity: ENTITY,
                delta_total: self.ledger.total_damage() - before,
            };
            self.system.on_damage_changed(&changed, &self.ledger, &mut self.world)
        }
    }

    #[test]
    fn test_multiple_fire_in_order() {
        let mut h = Harness::new(vec![
            Threshold::new(Trigger::total(20)),
            Threshold::new(Trigger::total(50)),
            Threshold::new(Trigger::total(500)),
        ]);

        let pass = h.damage(60);

        assert_eq!(pass.fired_indices().collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(pass.reached.len(), 2);
        assert_eq!(pass.reached[1].trigger(), &Trigger::total(50));
    }

    #[test]
    fn test_events_published_as_each_threshold_fires() {
        let mut h = Harness::new(vec![
            Threshold::new(Trigger::total(20))
                .with_behavior(Behavior::play_sound(SoundSpecifier::path("first"))),
            Threshold::new(Trigger::total(50))
                .with_behavior(Behavior::play_sound(SoundSpecifier::path("second"))),
        ]);
        h.ledger.apply(&DamageSpecifier::single(h.blunt, 60));
        let changed = DamageChanged {
            entity: ENTITY,
            delta_total: 60,
        };

        let journal = Rc::clone(&h.world.journal);
        let pass = h.system.on_damage_changed_with(&changed, &h.ledger, &mut h.world, |event| {
            journal.borrow_mut().push(format!("reached {}", event.index));
        });

        assert_eq!(pass.reached.len(), 2);
        assert_eq!(
            *h.world.journal.borrow(),
            vec!["path:first", "reached 0", "path:second", "reached 1"]
        );
    }

    #[test]
    fn test_destruction_stops_pass() {
        let mut h = Harness::new(vec![
            Threshold::new(Trigger::total(10))
                .with_behavior(Behavior::play_sound(SoundSpecifier::path("/Audio/break.ogg")))
                .with_behavior(Behavior::destruction())
                .with_behavior(Behavior::breakage()),
            Threshold::new(Trigger::total(5)).with_behavior(Behavior::breakage()),
        ]);

        let pass = h.damage(20);

        assert!(pass.destroyed);
        assert_eq!(pass.fired_indices().collect::<Vec<_>>(), vec![0]);
        assert_eq!(
            pass.fired[0].results,
            vec![BehaviorResult::Executed, BehaviorResult::Executed, BehaviorResult::Skipped]
        );
        assert_eq!(h.world.broken, 0);
        assert!(!h.system.contains(ENTITY));

        // Later notifications for the destroyed entity do nothing.
        assert!(h.damage(10).is_empty());
    }

    #[test]
    fn test_unknown_entity_is_ignored() {
        let mut h = Harness::new(vec![Threshold::new(Trigger::total(1))]);
        h.system.remove(ENTITY);

        assert!(h.damage(10).is_empty());
    }

    #[test]
    fn test_spawn_goes_through_world() {
        let mut h = Harness::new(vec![Threshold::new(Trigger::total(10)).with_behavior(
            Behavior::spawn([(PrototypeId::from("Shard"), SpawnRange::exactly(2))]),
        )]);

        h.damage(10);
        assert_eq!(h.world.spawned.len(), 2);
    }

    #[test]
    fn test_destroyed_at() {
        let h = Harness::new(vec![
            Threshold::new(Trigger::total(20)).with_behavior(Behavior::breakage()),
            Threshold::new(Trigger::total(150)).with_behavior(Behavior::destruction()),
            Threshold::new(Trigger::total(100)).with_behavior(Behavior::destruction()),
        ]);

        assert_eq!(h.system.destroyed_at(ENTITY), Some(100));
        assert_eq!(h.system.destroyed_at(EntityId(99)), None);
    }

    #[test]
    fn test_destroyed_at_ignores_non_total_triggers() {
        let blunt = DamageTypeId::new(0);
        let h = Harness::new(vec![
            Threshold::new(Trigger::by_type(blunt, 10)).with_behavior(Behavior::destruction()),
        ]);

        assert_eq!(h.system.destroyed_at(ENTITY), None);
    }
}
