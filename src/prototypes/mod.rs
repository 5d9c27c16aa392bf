//! Declarative prototype loading.
//!
//! A JSON document declares damage types, damage groups and, per prototype,
//! an ordered list of thresholds:
//!
//! ```json
//! {
//!   "damageTypes": ["Blunt", "Slash"],
//!   "damageGroups": { "Brute": ["Blunt", "Slash"] },
//!   "prototypes": {
//!     "Window": {
//!       "thresholds": [
//!         { "trigger": { "damage": 20 },
//!           "behaviors": [ { "acts": ["Breakage"] } ] }
//!       ]
//!     }
//!   }
//! }
//! ```
//!
//! Names are resolved while loading, so a loaded [`PrototypeCatalog`] never
//! refers to an undeclared type or group.

pub mod authoring;
mod error;
mod loader;

pub use error::ConfigError;
pub use loader::PrototypeCatalog;
