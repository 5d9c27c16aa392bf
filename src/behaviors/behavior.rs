//! Behavior definitions.
//!
//! Behaviors are the consequences a threshold executes when it fires. Like
//! triggers they are plain immutable data, shared by every entity of a
//! prototype; execution lives in [`super::BehaviorExecutor`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::PrototypeId;

/// Default scatter for spawned entities, in world units.
pub const DEFAULT_SPAWN_OFFSET: f32 = 0.5;

/// A set of structural acts.
///
/// `BREAKAGE` is non-terminal (the entity stays, marked broken);
/// `DESTRUCTION` is terminal (the entity is removed).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ThresholdActs(u8);

impl ThresholdActs {
    pub const NONE: Self = Self(0b00);
    pub const BREAKAGE: Self = Self(0b01);
    pub const DESTRUCTION: Self = Self(0b10);

    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }
}

impl std::ops::BitOr for ThresholdActs {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl std::fmt::Display for ThresholdActs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names = Vec::new();
        if self.contains(Self::BREAKAGE) {
            names.push("Breakage");
        }
        if self.contains(Self::DESTRUCTION) {
            names.push("Destruction");
        }
        if names.is_empty() {
            f.write_str("None")
        } else {
            f.write_str(&names.join("|"))
        }
    }
}

/// An inclusive spawn count range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnRange {
    pub min: u32,
    pub max: u32,
}

impl SpawnRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Exactly `count` spawns.
    pub const fn exactly(count: u32) -> Self {
        Self::new(count, count)
    }

    pub const fn is_valid(self) -> bool {
        self.min <= self.max
    }
}

/// Which audio cue to play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SoundSpecifier {
    /// A single audio file.
    Path(String),
    /// A named collection; the audio subsystem picks one entry.
    Collection(String),
}

impl SoundSpecifier {
    pub fn path(path: impl Into<String>) -> Self {
        Self::Path(path.into())
    }

    pub fn collection(name: impl Into<String>) -> Self {
        Self::Collection(name.into())
    }
}

impl std::fmt::Display for SoundSpecifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SoundSpecifier::Path(path) => write!(f, "path:{path}"),
            SoundSpecifier::Collection(name) => write!(f, "collection:{name}"),
        }
    }
}

/// A consequence executed when a threshold fires.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Behavior {
    /// Play an audio cue at the entity's position.
    PlaySound { sound: SoundSpecifier },

    /// Spawn a random count of each prototype near the entity.
    ///
    /// Entries are rolled in prototype-id order. Each spawned entity is
    /// scattered by up to `offset` on both axes.
    SpawnEntities {
        entries: BTreeMap<PrototypeId, SpawnRange>,
        offset: f32,
    },

    /// Apply structural acts to the entity.
    DoActs { acts: ThresholdActs },
}

impl Behavior {
    /// Create a play-sound behavior.
    pub fn play_sound(sound: SoundSpecifier) -> Self {
        Self::PlaySound { sound }
    }

    /// Create a spawn behavior with the default scatter.
    pub fn spawn(entries: impl IntoIterator<Item = (PrototypeId, SpawnRange)>) -> Self {
        Self::SpawnEntities {
            entries: entries.into_iter().collect(),
            offset: DEFAULT_SPAWN_OFFSET,
        }
    }

    /// Create a do-acts behavior.
    pub fn acts(acts: ThresholdActs) -> Self {
        Self::DoActs { acts }
    }

    /// Shorthand for `DoActs(BREAKAGE)`.
    pub fn breakage() -> Self {
        Self::acts(ThresholdActs::BREAKAGE)
    }

    /// Shorthand for `DoActs(DESTRUCTION)`.
    pub fn destruction() -> Self {
        Self::acts(ThresholdActs::DESTRUCTION)
    }

    /// Set the scatter of a spawn behavior (builder pattern).
    ///
    /// Other behaviors are returned unchanged.
    #[must_use]
    pub fn with_offset(self, offset: f32) -> Self {
        match self {
            Self::SpawnEntities { entries, .. } => Self::SpawnEntities { entries, offset },
            other => other,
        }
    }
}
