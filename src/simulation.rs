//! Simulation host.
//!
//! Wires the damage store, the destructible system and the in-memory world
//! together: damage mutations raise [`DamageChanged`], which is routed to
//! the system, whose events are queued and handed to subscribers.

use tracing::{debug, debug_span};

use crate::behaviors::WorldError;
use crate::core::{DamageTypeId, EntityId, Position, PrototypeId, SimRng, SimulationConfig};
use crate::damage::{DamageChanged, DamageSpecifier, DamageState, DamageableStore};
use crate::destructible::{DestructibleSystem, EvaluationPass, ThresholdReached};
use crate::prototypes::{ConfigError, PrototypeCatalog};
use crate::thresholds::ThresholdCollection;
use crate::world::SimWorld;

/// Listener for published [`ThresholdReached`] events.
pub type Subscriber = Box<dyn FnMut(&ThresholdReached) + Send>;

/// A self-contained destructible world.
pub struct Simulation {
    config: SimulationConfig,
    prototypes: PrototypeCatalog,
    damage: DamageableStore,
    world: SimWorld,
    system: DestructibleSystem,
    events: Vec<ThresholdReached>,
    subscribers: Vec<Subscriber>,
}

impl Simulation {
    pub fn new(config: SimulationConfig, prototypes: PrototypeCatalog) -> Self {
        let rng = SimRng::new(config.seed).for_context("destructible");
        Self {
            damage: DamageableStore::new(prototypes.damage_catalog().clone()),
            system: DestructibleSystem::new(rng),
            world: SimWorld::new(),
            events: Vec::new(),
            subscribers: Vec::new(),
            config,
            prototypes,
        }
    }

    /// Replace the world, e.g. one restricted to known spawn prototypes
    /// (builder pattern).
    #[must_use]
    pub fn with_world(mut self, world: SimWorld) -> Self {
        self.world = world;
        self
    }

    /// Create an entity from a prototype, with a fresh ledger and fresh
    /// threshold instances.
    pub fn spawn(&mut self, prototype: &PrototypeId, at: Position) -> Result<EntityId, ConfigError> {
        let collection = self.prototypes.instantiate(prototype)?;
        let entity = self.world.create(Some(prototype.clone()), at);
        self.attach(entity, collection);
        Ok(entity)
    }

    /// Put `child` inside `container`; destroying the container releases it.
    pub fn insert_into(&mut self, container: EntityId, child: EntityId) -> Result<(), WorldError> {
        self.world.insert_into(container, child)
    }

    /// Apply damage or healing. `None` if nothing changed.
    pub fn change_damage(
        &mut self,
        entity: EntityId,
        spec: &DamageSpecifier,
    ) -> Option<EvaluationPass> {
        let changed = self.damage.change_damage(entity, spec);
        self.dispatch(changed)
    }

    /// Set one type's amount directly. `None` if nothing changed.
    pub fn set_damage(
        &mut self,
        entity: EntityId,
        damage_type: DamageTypeId,
        amount: i64,
    ) -> Option<EvaluationPass> {
        let changed = self.damage.set_damage(entity, damage_type, amount);
        self.dispatch(changed)
    }

    /// Heal everything. `None` if the entity was undamaged.
    pub fn heal_all(&mut self, entity: EntityId) -> Option<EvaluationPass> {
        let changed = self.damage.heal_all(entity);
        self.dispatch(changed)
    }

    /// Register a listener called for every published event, in order.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&ThresholdReached) + Send + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Take all events published since the last drain.
    pub fn drain_events(&mut self) -> Vec<ThresholdReached> {
        std::mem::take(&mut self.events)
    }

    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    #[must_use]
    pub fn prototypes(&self) -> &PrototypeCatalog {
        &self.prototypes
    }

    #[must_use]
    pub fn world(&self) -> &SimWorld {
        &self.world
    }

    #[must_use]
    pub fn system(&self) -> &DestructibleSystem {
        &self.system
    }

    /// Threshold instances of an entity, for the debug surface.
    pub fn thresholds_mut(&mut self, entity: EntityId) -> Option<&mut ThresholdCollection> {
        self.system.get_mut(entity)
    }

    #[must_use]
    pub fn ledger(&self, entity: EntityId) -> Option<&DamageState> {
        self.damage.get(entity)
    }

    #[must_use]
    pub fn exists(&self, entity: EntityId) -> bool {
        self.world.record(entity).is_some()
    }

    #[must_use]
    pub fn destroyed_at(&self, entity: EntityId) -> Option<i64> {
        self.system.destroyed_at(entity)
    }

    fn attach(&mut self, entity: EntityId, collection: ThresholdCollection) {
        self.damage.insert(entity);
        self.system.insert(entity, collection);
    }

    fn dispatch(&mut self, changed: Option<DamageChanged>) -> Option<EvaluationPass> {
        let changed = changed?;
        let _span = debug_span!("simulation", name = %self.config.name).entered();

        let ledger = self.damage.get(changed.entity)?;
        let subscribers = &mut self.subscribers;
        let events = &mut self.events;
        let pass = self
            .system
            .on_damage_changed_with(&changed, ledger, &mut self.world, |event| {
                for subscriber in subscribers.iter_mut() {
                    subscriber(event);
                }
                events.push(event.clone());
            });
        self.settle();

        Some(pass)
    }

    /// Attach components to entities spawned by behaviors and drop those of
    /// destroyed entities.
    fn settle(&mut self) {
        for entity in self.world.drain_spawned() {
            let prototype = self
                .world
                .record(entity)
                .and_then(|record| record.prototype.clone());
            let Some(prototype) = prototype else { continue };

            match self.prototypes.instantiate(&prototype) {
                Ok(collection) => self.attach(entity, collection),
                Err(_) => debug!(%entity, %prototype, "spawned entity has no thresholds"),
            }
        }

        for entity in self.world.drain_destroyed() {
            self.damage.remove(entity);
            self.system.remove(entity);
        }
    }
}
