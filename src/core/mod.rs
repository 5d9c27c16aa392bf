//! Core engine types: entities, positions, RNG, configuration.
//!
//! This module contains the building blocks shared by every other module.
//! Hosts configure damage types and groups via `DamageCatalog` rather than
//! modifying the core.

pub mod entity;
pub mod rng;
pub mod config;

pub use entity::{EntityId, Position};
pub use rng::SimRng;
pub use config::{
    DamageCatalog, DamageGroupId, DamageTypeId, GroupMembers, PrototypeId, SimulationConfig,
};
