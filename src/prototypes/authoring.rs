//! Raw authoring records.
//!
//! These mirror the JSON document one to one. Names are still strings here;
//! [`super::PrototypeCatalog`] resolves them against the damage catalog.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::behaviors::{SoundSpecifier, SpawnRange};

/// A whole prototype document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PrototypeFile {
    #[serde(default)]
    pub damage_types: Vec<String>,
    #[serde(default)]
    pub damage_groups: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub prototypes: BTreeMap<String, PrototypeRecord>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PrototypeRecord {
    #[serde(default)]
    pub thresholds: Vec<ThresholdRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ThresholdRecord {
    pub trigger: TriggerExpr,
    #[serde(default)]
    pub behaviors: Vec<BehaviorRecord>,
    #[serde(default)]
    pub triggers_once: bool,
}

/// A trigger expression, distinguished by its keys.
///
/// `{"and": [...]}`, `{"damageType": T, "damage": N}`,
/// `{"damageGroup": G, "damage": N}` or `{"damage": N}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TriggerExpr {
    And(AndExpr),
    ByType(TypeExpr),
    ByGroup(GroupExpr),
    Total(TotalExpr),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AndExpr {
    pub and: Vec<TriggerExpr>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TypeExpr {
    pub damage_type: String,
    pub damage: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GroupExpr {
    pub damage_group: String,
    pub damage: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TotalExpr {
    pub damage: i64,
}

/// A behavior, distinguished by its keys.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BehaviorRecord {
    Sound(SoundRecord),
    Spawn(SpawnRecord),
    Acts(ActsRecord),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SoundRecord {
    pub sound: SoundSpecifier,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpawnRecord {
    pub spawn: BTreeMap<String, SpawnRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<f32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActsRecord {
    pub acts: Vec<ActName>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActName {
    Breakage,
    Destruction,
}
