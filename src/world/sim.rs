//! In-memory world.
//!
//! `SimWorld` is a small entity table with positions, containment and
//! broken/destroyed bookkeeping. It records every sound and spawn so tests
//! and tooling can observe what behaviors did.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::behaviors::{DestructibleWorld, SoundSpecifier, WorldError};
use crate::core::{EntityId, Position, PrototypeId};

/// One live entity.
#[derive(Clone, Debug, PartialEq)]
pub struct EntityRecord {
    /// Prototype the entity was created from, if any.
    pub prototype: Option<PrototypeId>,
    /// Own position. Contained entities report their container's position.
    pub position: Position,
    /// Set by the breakage act.
    pub broken: bool,
    /// Container holding this entity.
    pub contained_in: Option<EntityId>,
    /// Entities held by this one.
    pub contents: Vec<EntityId>,
}

impl EntityRecord {
    fn new(prototype: Option<PrototypeId>, position: Position) -> Self {
        Self {
            prototype,
            position,
            broken: false,
            contained_in: None,
            contents: Vec::new(),
        }
    }
}

/// A sound played by a behavior.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayedSound {
    pub sound: SoundSpecifier,
    pub at: Position,
}

/// In-memory [`DestructibleWorld`].
#[derive(Clone, Debug, Default)]
pub struct SimWorld {
    entities: FxHashMap<EntityId, EntityRecord>,
    next_id: u32,
    known_prototypes: Option<FxHashSet<PrototypeId>>,
    sounds: Vec<PlayedSound>,
    spawned: Vec<EntityId>,
    destroyed: Vec<EntityId>,
}

impl SimWorld {
    /// Create an empty world that accepts any spawn prototype.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict behavior spawns to a known set of prototypes (builder pattern).
    ///
    /// Spawning anything else fails with [`WorldError::UnknownPrototype`].
    #[must_use]
    pub fn with_known_prototypes(mut self, prototypes: impl IntoIterator<Item = PrototypeId>) -> Self {
        self.known_prototypes = Some(prototypes.into_iter().collect());
        self
    }

    /// Create an entity directly, bypassing prototype checks.
    pub fn create(&mut self, prototype: Option<PrototypeId>, at: Position) -> EntityId {
        self.next_id += 1;
        let id = EntityId(self.next_id);
        self.entities.insert(id, EntityRecord::new(prototype, at));
        id
    }

    /// Put `child` inside `container`.
    pub fn insert_into(&mut self, container: EntityId, child: EntityId) -> Result<(), WorldError> {
        if container == child {
            return Err(WorldError::MissingEntity(child));
        }
        if !self.entities.contains_key(&container) {
            return Err(WorldError::MissingEntity(container));
        }

        let previous = match self.entities.get_mut(&child) {
            Some(record) => record.contained_in.replace(container),
            None => return Err(WorldError::MissingEntity(child)),
        };
        if let Some(old) = previous.and_then(|p| self.entities.get_mut(&p)) {
            old.contents.retain(|&c| c != child);
        }
        if let Some(record) = self.entities.get_mut(&container) {
            record.contents.push(child);
        }
        Ok(())
    }

    #[must_use]
    pub fn record(&self, entity: EntityId) -> Option<&EntityRecord> {
        self.entities.get(&entity)
    }

    #[must_use]
    pub fn is_broken(&self, entity: EntityId) -> bool {
        self.entities.get(&entity).is_some_and(|r| r.broken)
    }

    #[must_use]
    pub fn contents(&self, container: EntityId) -> &[EntityId] {
        self.entities
            .get(&container)
            .map(|r| r.contents.as_slice())
            .unwrap_or(&[])
    }

    /// Live entities created from `prototype`, in ID order.
    #[must_use]
    pub fn entities_of(&self, prototype: &PrototypeId) -> Vec<EntityId> {
        let mut ids: Vec<_> = self
            .entities
            .iter()
            .filter(|(_, r)| r.prototype.as_ref() == Some(prototype))
            .map(|(&id, _)| id)
            .collect();
        ids.sort();
        ids
    }

    /// Number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Every sound played so far.
    #[must_use]
    pub fn sounds(&self) -> &[PlayedSound] {
        &self.sounds
    }

    /// Entities spawned by behaviors since the last drain.
    pub fn drain_spawned(&mut self) -> Vec<EntityId> {
        std::mem::take(&mut self.spawned)
    }

    /// Entities destroyed since the last drain.
    pub fn drain_destroyed(&mut self) -> Vec<EntityId> {
        std::mem::take(&mut self.destroyed)
    }
}

impl DestructibleWorld for SimWorld {
    fn exists(&self, entity: EntityId) -> bool {
        self.entities.contains_key(&entity)
    }

    fn position(&self, entity: EntityId) -> Option<Position> {
        let mut record = self.entities.get(&entity)?;
        // Containment chains are short; guard against cycles anyway.
        for _ in 0..self.entities.len() {
            match record.contained_in.and_then(|c| self.entities.get(&c)) {
                Some(container) => record = container,
                None => break,
            }
        }
        Some(record.position)
    }

    fn play_sound(&mut self, sound: &SoundSpecifier, at: Position) {
        self.sounds.push(PlayedSound {
            sound: sound.clone(),
            at,
        });
    }

    fn spawn(&mut self, prototype: &PrototypeId, at: Position) -> Result<EntityId, WorldError> {
        if let Some(known) = &self.known_prototypes {
            if !known.contains(prototype) {
                return Err(WorldError::UnknownPrototype(prototype.clone()));
            }
        }

        let id = self.create(Some(prototype.clone()), at);
        self.spawned.push(id);
        Ok(id)
    }

    fn break_entity(&mut self, entity: EntityId) -> Result<(), WorldError> {
        let record = self
            .entities
            .get_mut(&entity)
            .ok_or(WorldError::MissingEntity(entity))?;
        record.broken = true;
        Ok(())
    }

    fn destroy_entity(&mut self, entity: EntityId) -> Result<(), WorldError> {
        let last_position = self.position(entity).ok_or(WorldError::MissingEntity(entity))?;
        let Some(record) = self.entities.remove(&entity) else {
            return Err(WorldError::MissingEntity(entity));
        };

        if let Some(container) = record.contained_in.and_then(|c| self.entities.get_mut(&c)) {
            container.contents.retain(|&c| c != entity);
        }

        // Release contents where the container last stood.
        for child in record.contents {
            if let Some(child_record) = self.entities.get_mut(&child) {
                child_record.contained_in = None;
                child_record.position = last_position;
            }
        }

        self.destroyed.push(entity);
        Ok(())
    }
}
