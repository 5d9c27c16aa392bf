//! Behavior execution.
//!
//! The `BehaviorExecutor` applies behaviors to an entity through the
//! [`DestructibleWorld`] seam. Hosts implement the trait over their own
//! entity, audio and spawn subsystems.

use tracing::{debug, trace, warn};

use crate::core::{EntityId, Position, PrototypeId, SimRng};

use super::{Behavior, SoundSpecifier, SpawnRange, ThresholdActs, WorldError};

/// World operations behaviors need.
pub trait DestructibleWorld {
    /// Is the entity still alive?
    fn exists(&self, entity: EntityId) -> bool;

    /// Current position of a live entity.
    fn position(&self, entity: EntityId) -> Option<Position>;

    /// Play an audio cue. Fire-and-forget.
    fn play_sound(&mut self, sound: &SoundSpecifier, at: Position);

    /// Spawn one entity of `prototype` at `at`.
    fn spawn(&mut self, prototype: &PrototypeId, at: Position) -> Result<EntityId, WorldError>;

    /// Apply the non-terminal breakage act.
    fn break_entity(&mut self, entity: EntityId) -> Result<(), WorldError>;

    /// Destroy the entity, releasing anything it contains.
    fn destroy_entity(&mut self, entity: EntityId) -> Result<(), WorldError>;
}

/// Result of executing one behavior.
#[derive(Clone, Debug, PartialEq)]
pub enum BehaviorResult {
    /// Behavior executed.
    Executed,
    /// Behavior ran but the world reported failures.
    Failed(Vec<WorldError>),
    /// Behavior did not run (the entity was already gone).
    Skipped,
}

impl BehaviorResult {
    #[must_use]
    pub fn is_executed(&self) -> bool {
        matches!(self, Self::Executed)
    }

    #[must_use]
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped)
    }
}

/// Executes behaviors against a world.
pub struct BehaviorExecutor;

impl BehaviorExecutor {
    /// Execute a behavior list in order.
    ///
    /// Failures do not stop the list. Once the entity no longer exists,
    /// every remaining behavior is `Skipped`.
    pub fn execute_all<W: DestructibleWorld + ?Sized>(
        behaviors: &[Behavior],
        entity: EntityId,
        world: &mut W,
        rng: &mut SimRng,
    ) -> Vec<BehaviorResult> {
        let mut results = Vec::with_capacity(behaviors.len());

        for behavior in behaviors {
            if !world.exists(entity) {
                results.push(BehaviorResult::Skipped);
                continue;
            }
            results.push(Self::execute(behavior, entity, world, rng));
        }

        results
    }

    /// Execute a single behavior.
    pub fn execute<W: DestructibleWorld + ?Sized>(
        behavior: &Behavior,
        entity: EntityId,
        world: &mut W,
        rng: &mut SimRng,
    ) -> BehaviorResult {
        match behavior {
            Behavior::PlaySound { sound } => {
                let Some(at) = world.position(entity) else {
                    return BehaviorResult::Skipped;
                };
                trace!(%entity, %sound, "playing sound");
                world.play_sound(sound, at);
                BehaviorResult::Executed
            }

            Behavior::SpawnEntities { entries, offset } => {
                let Some(origin) = world.position(entity) else {
                    return BehaviorResult::Skipped;
                };

                let mut errors = Vec::new();
                for (prototype, range) in entries {
                    if let Err(err) = Self::spawn_entry(prototype, *range, *offset, origin, world, rng)
                    {
                        warn!(%entity, %prototype, error = %err, "spawn behavior failed");
                        errors.push(err);
                    }
                }

                if errors.is_empty() {
                    BehaviorResult::Executed
                } else {
                    BehaviorResult::Failed(errors)
                }
            }

            Behavior::DoActs { acts } => Self::do_acts(*acts, entity, world),
        }
    }

    fn spawn_entry<W: DestructibleWorld + ?Sized>(
        prototype: &PrototypeId,
        range: SpawnRange,
        offset: f32,
        origin: Position,
        world: &mut W,
        rng: &mut SimRng,
    ) -> Result<(), WorldError> {
        let count = rng.gen_inclusive(range.min, range.max);
        for _ in 0..count {
            let at = origin.offset(rng.gen_offset(offset), rng.gen_offset(offset));
            let spawned = world.spawn(prototype, at)?;
            trace!(%prototype, %spawned, %at, "spawned");
        }
        Ok(())
    }

    fn do_acts<W: DestructibleWorld + ?Sized>(
        acts: ThresholdActs,
        entity: EntityId,
        world: &mut W,
    ) -> BehaviorResult {
        let mut errors = Vec::new();

        if acts.contains(ThresholdActs::BREAKAGE) {
            debug!(%entity, "breakage");
            if let Err(err) = world.break_entity(entity) {
                warn!(%entity, error = %err, "breakage failed");
                errors.push(err);
            }
        }

        // Destroying an already-destroyed entity is a no-op.
        if acts.contains(ThresholdActs::DESTRUCTION) && world.exists(entity) {
            debug!(%entity, "destruction");
            if let Err(err) = world.destroy_entity(entity) {
                warn!(%entity, error = %err, "destruction failed");
                errors.push(err);
            }
        }

        if errors.is_empty() {
            BehaviorResult::Executed
        } else {
            BehaviorResult::Failed(errors)
        }
    }
}
