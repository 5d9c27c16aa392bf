//! # destructible
//!
//! A damage threshold engine for destructible entities.
//!
//! Entities accumulate typed damage in a ledger. Each entity carries an
//! ordered list of thresholds; a threshold pairs a trigger (a predicate over
//! the ledger) with behaviors (sounds, spawns, breakage, destruction) that
//! run when the trigger becomes true.
//!
//! ## Design Principles
//!
//! 1. **Edge-Triggered**: A threshold fires on the false-to-true transition
//!    of its trigger, never while the condition merely stays true. Healing
//!    below the trigger re-arms it.
//!
//! 2. **Shared Definitions, Per-Entity State**: Thresholds are immutable and
//!    shared (`Arc<[Threshold]>`) between every entity of a prototype. The
//!    hysteresis lives in a parallel per-entity state table.
//!
//! 3. **Closed Variants**: Triggers and behaviors are enums matched
//!    exhaustively. Adding a variant is a compile error until handled.
//!
//! ## Modules
//!
//! - `core`: Entity IDs, positions, damage catalog, RNG, configuration
//! - `damage`: Damage specifiers, the per-entity ledger, change notifications
//! - `triggers`: Trigger predicates over a ledger
//! - `thresholds`: Thresholds and their edge-detection state
//! - `behaviors`: Behaviors and the world collaborator they act on
//! - `destructible`: The evaluation driver and published events
//! - `prototypes`: JSON authoring format and prototype loading
//! - `world`: In-memory reference world
//! - `simulation`: A host wiring all of the above together

pub mod core;
pub mod damage;
pub mod triggers;
pub mod thresholds;
pub mod behaviors;
pub mod destructible;
pub mod prototypes;
pub mod world;
pub mod simulation;

// Re-export commonly used types
pub use crate::core::{
    EntityId, Position, SimRng,
    DamageCatalog, DamageGroupId, DamageTypeId, PrototypeId, SimulationConfig,
};

pub use crate::damage::{DamageChanged, DamageLedger, DamageSpecifier, DamageState, DamageableStore};

pub use crate::triggers::Trigger;

pub use crate::thresholds::{Evaluation, Threshold, ThresholdCollection, ThresholdSet, ThresholdState};

pub use crate::behaviors::{
    Behavior, BehaviorExecutor, BehaviorResult, DestructibleWorld,
    SoundSpecifier, SpawnRange, ThresholdActs, WorldError,
};

pub use crate::destructible::{DestructibleSystem, EvaluationPass, FiredThreshold, ThresholdReached};

pub use crate::prototypes::{ConfigError, PrototypeCatalog};

pub use crate::world::SimWorld;

pub use crate::simulation::Simulation;
