//! Entity identification and placement.
//!
//! Every simulated object (a window, a crate, a shard of glass) has a unique
//! `EntityId`. IDs are allocated by the world and never reused, so a stale
//! ID held across a destruction simply stops resolving.
//!
//! ## Usage
//!
//! ```
//! use destructible::core::{EntityId, Position};
//!
//! let window = EntityId(10);
//! assert_eq!(window.raw(), 10);
//! assert_eq!(format!("{}", window), "Entity(10)");
//!
//! let here = Position::new(1.0, 2.0);
//! assert_eq!(here.offset(0.5, -0.5), Position::new(1.5, 1.5));
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for any simulated entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Create an entity ID from a raw value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// A world-space position.
///
/// Behaviors use the owning entity's position to place sounds and spawned
/// debris.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    /// The world origin.
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Translate by `(dx, dy)`.
    #[must_use]
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Chebyshev distance, used to check that spawned debris landed near
    /// its source.
    #[must_use]
    pub fn chebyshev(self, other: Self) -> f32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}
