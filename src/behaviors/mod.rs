//! Behaviors executed when a threshold fires.
//!
//! - [`Behavior`]: closed set of consequences (sound, spawn, acts)
//! - [`ThresholdActs`]: structural act flags (breakage, destruction)
//! - [`BehaviorExecutor`]: applies behaviors through [`DestructibleWorld`]
//!
//! ## Failure Policy
//!
//! Behaviors in one list are independent. A failing behavior is reported
//! as [`BehaviorResult::Failed`] and the rest of the list still runs; there
//! is no rollback. The only coupling is destruction: once the entity is
//! gone, the remaining behaviors are skipped.

mod behavior;
mod error;
mod executor;

pub use behavior::{Behavior, SoundSpecifier, SpawnRange, ThresholdActs, DEFAULT_SPAWN_OFFSET};
pub use error::WorldError;
pub use executor::{BehaviorExecutor, BehaviorResult, DestructibleWorld};
