//! Evaluation driver and published events.
//!
//! ## Key Components
//!
//! - [`DestructibleSystem`]: per-entity threshold collections; handles
//!   [`crate::damage::DamageChanged`]
//! - [`ThresholdReached`]: published once per firing
//! - [`EvaluationPass`]: what one notification did
//!
//! ## Ordering
//!
//! For one entity, thresholds are evaluated strictly in collection order
//! and a fired threshold's behaviors run before the next threshold is
//! evaluated. Several thresholds may fire from one notification. Passes
//! for different entities touch disjoint state.

mod event;
mod system;

pub use event::{EvaluationPass, FiredThreshold, ThresholdReached};
pub use system::DestructibleSystem;
