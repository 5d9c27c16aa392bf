//! Configuration types.
//!
//! Hosts configure the engine at startup by providing:
//! - `DamageCatalog`: which damage types exist and how they group
//! - `SimulationConfig`: seed and naming for a simulation host
//!
//! The engine never hardcodes damage types - authored data defines them.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Damage type identifier (Blunt, Slash, Heat, ...).
///
/// Opaque to the engine. Names are resolved through `DamageCatalog`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DamageTypeId(pub u16);

impl DamageTypeId {
    /// Create a new damage type ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for DamageTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DamageType({})", self.0)
    }
}

/// Damage group identifier (Brute, Burn, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DamageGroupId(pub u16);

impl DamageGroupId {
    /// Create a new damage group ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for DamageGroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DamageGroup({})", self.0)
    }
}

/// Entity prototype identifier, e.g. `"ShardGlass"`.
///
/// Prototypes are named by authored data; spawn behaviors refer to them by
/// name and the world resolves them.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrototypeId(pub String);

impl PrototypeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PrototypeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for PrototypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Members of a damage group. Most groups have a handful of types.
pub type GroupMembers = SmallVec<[DamageTypeId; 4]>;

#[derive(Clone, Debug)]
struct GroupEntry {
    name: String,
    members: GroupMembers,
}

/// The authored set of damage types and groups.
///
/// A group is a named set of types whose amounts are summed by group-level
/// triggers. One catalog is shared (behind an `Arc`) by every ledger in a
/// simulation.
///
/// ```
/// use destructible::core::DamageCatalog;
///
/// let catalog = DamageCatalog::new()
///     .with_type("Blunt")
///     .with_type("Slash")
///     .with_group("Brute", ["Blunt", "Slash", "Piercing"]);
///
/// let brute = catalog.group_id("Brute").unwrap();
/// assert_eq!(catalog.group_members(brute).len(), 3);
/// assert!(catalog.type_id("Piercing").is_some());
/// ```
#[derive(Clone, Debug, Default)]
pub struct DamageCatalog {
    type_names: Vec<String>,
    types_by_name: FxHashMap<String, DamageTypeId>,
    groups: Vec<GroupEntry>,
    groups_by_name: FxHashMap<String, DamageGroupId>,
}

impl DamageCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a damage type, returning its ID.
    ///
    /// Registering an existing name returns the existing ID. `None` once
    /// every `u16` ID is taken.
    pub fn add_type(&mut self, name: impl Into<String>) -> Option<DamageTypeId> {
        let name = name.into();
        if let Some(&id) = self.types_by_name.get(&name) {
            return Some(id);
        }

        let id = DamageTypeId::new(u16::try_from(self.type_names.len()).ok()?);
        self.types_by_name.insert(name.clone(), id);
        self.type_names.push(name);
        Some(id)
    }

    /// Register a damage group over already-resolved type IDs.
    ///
    /// Registering an existing name replaces its members. `None` once every
    /// `u16` ID is taken.
    pub fn add_group(
        &mut self,
        name: impl Into<String>,
        members: impl IntoIterator<Item = DamageTypeId>,
    ) -> Option<DamageGroupId> {
        let name = name.into();
        let mut members: GroupMembers = members.into_iter().collect();
        members.sort_unstable();
        members.dedup();

        if let Some(&id) = self.groups_by_name.get(&name) {
            self.groups[id.0 as usize].members = members;
            return Some(id);
        }

        let id = DamageGroupId::new(u16::try_from(self.groups.len()).ok()?);
        self.groups_by_name.insert(name.clone(), id);
        self.groups.push(GroupEntry { name, members });
        Some(id)
    }

    /// Register a type (builder pattern).
    #[must_use]
    pub fn with_type(mut self, name: impl Into<String>) -> Self {
        self.add_type(name);
        self
    }

    /// Register a group by member names (builder pattern).
    ///
    /// Member names that are not yet registered are registered as types.
    /// Names past the ID capacity are dropped.
    #[must_use]
    pub fn with_group<S: Into<String>>(
        mut self,
        name: impl Into<String>,
        members: impl IntoIterator<Item = S>,
    ) -> Self {
        let ids: Vec<_> = members.into_iter().filter_map(|m| self.add_type(m)).collect();
        self.add_group(name, ids);
        self
    }

    /// Look up a type by name.
    #[must_use]
    pub fn type_id(&self, name: &str) -> Option<DamageTypeId> {
        self.types_by_name.get(name).copied()
    }

    /// Look up a group by name.
    #[must_use]
    pub fn group_id(&self, name: &str) -> Option<DamageGroupId> {
        self.groups_by_name.get(name).copied()
    }

    #[must_use]
    pub fn type_name(&self, id: DamageTypeId) -> Option<&str> {
        self.type_names.get(id.0 as usize).map(String::as_str)
    }

    #[must_use]
    pub fn group_name(&self, id: DamageGroupId) -> Option<&str> {
        self.groups.get(id.0 as usize).map(|g| g.name.as_str())
    }

    /// Types belonging to a group. Unknown groups have no members.
    #[must_use]
    pub fn group_members(&self, id: DamageGroupId) -> &[DamageTypeId] {
        self.groups
            .get(id.0 as usize)
            .map(|g| g.members.as_slice())
            .unwrap_or(&[])
    }

    /// Iterate all registered type IDs in registration order.
    pub fn types(&self) -> impl Iterator<Item = DamageTypeId> + '_ {
        (0..=u16::MAX).take(self.type_names.len()).map(DamageTypeId::new)
    }

    #[must_use]
    pub fn type_count(&self) -> usize {
        self.type_names.len()
    }

    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

/// Configuration for a simulation host.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Human-readable name, attached to log spans.
    pub name: String,

    /// Seed for spawn rolls and scatter offsets.
    pub seed: u64,
}

impl SimulationConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            seed: 0,
        }
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new("simulation")
    }
}
