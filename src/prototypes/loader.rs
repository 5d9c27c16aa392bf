//! Prototype catalog: resolves authoring records into shared thresholds.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::behaviors::{Behavior, ThresholdActs, DEFAULT_SPAWN_OFFSET};
use crate::core::{DamageCatalog, PrototypeId};
use crate::thresholds::{Threshold, ThresholdCollection, ThresholdSet};
use crate::triggers::Trigger;

use super::authoring::{ActName, BehaviorRecord, PrototypeFile, ThresholdRecord, TriggerExpr};
use super::ConfigError;

/// Loaded prototypes.
///
/// Each prototype's thresholds are resolved once and shared by every entity
/// created from it.
#[derive(Clone, Debug, Default)]
pub struct PrototypeCatalog {
    damage: Arc<DamageCatalog>,
    prototypes: BTreeMap<PrototypeId, ThresholdSet>,
}

impl PrototypeCatalog {
    /// Parse and resolve a JSON prototype document.
    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        let file: PrototypeFile = serde_json::from_str(source)?;
        Self::from_file(file)
    }

    /// Read, parse and resolve a JSON prototype document from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let file: PrototypeFile =
            serde_json::from_str(&source).map_err(|source| ConfigError::ParseFile {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_file(file)
    }

    /// Resolve an already-parsed document.
    pub fn from_file(file: PrototypeFile) -> Result<Self, ConfigError> {
        let mut damage = DamageCatalog::new();
        for name in &file.damage_types {
            if damage.type_id(name).is_some() {
                return Err(ConfigError::DuplicateDamageType(name.clone()));
            }
            damage
                .add_type(name.as_str())
                .ok_or_else(|| ConfigError::TooManyIds {
                    kind: "type",
                    name: name.clone(),
                })?;
        }

        for (group, members) in &file.damage_groups {
            let ids = members
                .iter()
                .map(|m| {
                    damage.type_id(m).ok_or_else(|| ConfigError::UnknownDamageType {
                        name: m.clone(),
                        context: format!("group '{group}'"),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            damage
                .add_group(group.as_str(), ids)
                .ok_or_else(|| ConfigError::TooManyIds {
                    kind: "group",
                    name: group.clone(),
                })?;
        }

        let mut prototypes = BTreeMap::new();
        for (name, record) in &file.prototypes {
            let id = PrototypeId::new(name.as_str());
            let thresholds = record
                .thresholds
                .iter()
                .enumerate()
                .map(|(index, t)| resolve_threshold(&damage, &id, index, t))
                .collect::<Result<Vec<_>, _>>()?;
            prototypes.insert(id, ThresholdSet::from(thresholds));
        }

        debug!(
            types = damage.type_count(),
            groups = damage.group_count(),
            prototypes = prototypes.len(),
            "loaded prototypes"
        );

        Ok(Self {
            damage: Arc::new(damage),
            prototypes,
        })
    }

    /// Build a catalog directly from resolved thresholds.
    pub fn from_parts(
        damage: Arc<DamageCatalog>,
        prototypes: impl IntoIterator<Item = (PrototypeId, Vec<Threshold>)>,
    ) -> Self {
        Self {
            damage,
            prototypes: prototypes
                .into_iter()
                .map(|(id, thresholds)| (id, ThresholdSet::from(thresholds)))
                .collect(),
        }
    }

    #[must_use]
    pub fn damage_catalog(&self) -> &Arc<DamageCatalog> {
        &self.damage
    }

    /// Shared thresholds of a prototype.
    #[must_use]
    pub fn thresholds(&self, id: &PrototypeId) -> Option<&ThresholdSet> {
        self.prototypes.get(id)
    }

    /// Fresh per-entity collection for a prototype.
    pub fn instantiate(&self, id: &PrototypeId) -> Result<ThresholdCollection, ConfigError> {
        self.thresholds(id)
            .map(|set| ThresholdCollection::new(Arc::clone(set)))
            .ok_or_else(|| ConfigError::UnknownPrototype(id.clone()))
    }

    #[must_use]
    pub fn contains(&self, id: &PrototypeId) -> bool {
        self.prototypes.contains_key(id)
    }

    /// Prototype IDs in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &PrototypeId> {
        self.prototypes.keys()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.prototypes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prototypes.is_empty()
    }
}

fn resolve_threshold(
    damage: &DamageCatalog,
    prototype: &PrototypeId,
    index: usize,
    record: &ThresholdRecord,
) -> Result<Threshold, ConfigError> {
    let context = format!("prototype '{prototype}' threshold {index}");
    let trigger = resolve_trigger(damage, &record.trigger, &context)?;
    if trigger.is_trivially_true() {
        warn!(%prototype, index, "threshold trigger is always satisfied");
    }

    let mut threshold = Threshold::new(trigger);
    threshold.triggers_once = record.triggers_once;
    for behavior in &record.behaviors {
        threshold.behaviors.push(resolve_behavior(behavior, &context)?);
    }
    Ok(threshold)
}

fn resolve_trigger(
    damage: &DamageCatalog,
    expr: &TriggerExpr,
    context: &str,
) -> Result<Trigger, ConfigError> {
    match expr {
        TriggerExpr::Total(t) => Ok(Trigger::total(t.damage)),
        TriggerExpr::ByType(t) => {
            let id = damage
                .type_id(&t.damage_type)
                .ok_or_else(|| ConfigError::UnknownDamageType {
                    name: t.damage_type.clone(),
                    context: context.to_string(),
                })?;
            Ok(Trigger::by_type(id, t.damage))
        }
        TriggerExpr::ByGroup(g) => {
            let id = damage
                .group_id(&g.damage_group)
                .ok_or_else(|| ConfigError::UnknownDamageGroup {
                    name: g.damage_group.clone(),
                    context: context.to_string(),
                })?;
            Ok(Trigger::by_group(id, g.damage))
        }
        TriggerExpr::And(a) => {
            let children = a
                .and
                .iter()
                .map(|child| resolve_trigger(damage, child, context))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Trigger::all(children))
        }
    }
}

fn resolve_behavior(record: &BehaviorRecord, context: &str) -> Result<Behavior, ConfigError> {
    match record {
        BehaviorRecord::Sound(s) => Ok(Behavior::play_sound(s.sound.clone())),
        BehaviorRecord::Spawn(s) => {
            let mut entries = Vec::with_capacity(s.spawn.len());
            for (name, &range) in &s.spawn {
                let spawn = PrototypeId::new(name.as_str());
                if !range.is_valid() {
                    return Err(ConfigError::InvalidSpawnRange {
                        spawn,
                        context: context.to_string(),
                        min: range.min,
                        max: range.max,
                    });
                }
                entries.push((spawn, range));
            }
            Ok(Behavior::spawn(entries).with_offset(s.offset.unwrap_or(DEFAULT_SPAWN_OFFSET)))
        }
        BehaviorRecord::Acts(a) => {
            let acts = a.acts.iter().fold(ThresholdActs::NONE, |acc, act| {
                acc | match act {
                    ActName::Breakage => ThresholdActs::BREAKAGE,
                    ActName::Destruction => ThresholdActs::DESTRUCTION,
                }
            });
            Ok(Behavior::acts(acts))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behaviors::{SoundSpecifier, SpawnRange};

    const WINDOW: &str = r#"{
        "damageTypes": ["Blunt", "Slash", "Heat"],
        "damageGroups": { "Brute": ["Blunt", "Slash"] },
        "prototypes": {
            "Window": {
                "thresholds": [
                    { "trigger": { "damage": 20 },
                      "behaviors": [ { "sound": { "path": "/Audio/glass.ogg" } },
                                     { "acts": ["Breakage"] } ] },
                    { "trigger": { "and": [ { "damageType": "Blunt", "damage": 10 },
                                            { "damageGroup": "Brute", "damage": 15 } ] },
                      "behaviors": [ { "spawn": { "Shard": { "min": 1, "max": 2 } }, "offset": 0.25 },
                                     { "acts": ["Destruction"] } ],
                      "triggersOnce": true }
                ]
            },
            "Shard": {}
        }
    }"#;

    #[test]
    fn test_load_document() {
        let catalog = PrototypeCatalog::from_json(WINDOW).unwrap();
        let damage = catalog.damage_catalog();
        let blunt = damage.type_id("Blunt").unwrap();
        let brute = damage.group_id("Brute").unwrap();

        assert_eq!(catalog.len(), 2);
        assert!(catalog.thresholds(&PrototypeId::from("Shard")).unwrap().is_empty());

        let window = catalog.thresholds(&PrototypeId::from("Window")).unwrap();
        assert_eq!(window.len(), 2);
        assert_eq!(window[0].trigger, Trigger::total(20));
        assert_eq!(
            window[0].behaviors,
            vec![
                Behavior::play_sound(SoundSpecifier::path("/Audio/glass.ogg")),
                Behavior::breakage()
            ]
        );
        assert!(!window[0].triggers_once);

        assert_eq!(
            window[1].trigger,
            Trigger::all([Trigger::by_type(blunt, 10), Trigger::by_group(brute, 15)])
        );
        assert_eq!(
            window[1].behaviors[0],
            Behavior::spawn([(PrototypeId::from("Shard"), SpawnRange::new(1, 2))]).with_offset(0.25)
        );
        assert!(window[1].triggers_once);
    }

    #[test]
    fn test_instances_share_definitions() {
        let catalog = PrototypeCatalog::from_json(WINDOW).unwrap();
        let id = PrototypeId::from("Window");

        let a = catalog.instantiate(&id).unwrap();
        let b = catalog.instantiate(&id).unwrap();
        assert!(Arc::ptr_eq(a.definitions(), b.definitions()));

        assert!(matches!(
            catalog.instantiate(&PrototypeId::from("Door")),
            Err(ConfigError::UnknownPrototype(_))
        ));
    }

    #[test]
    fn test_default_offset() {
        let json = r#"{ "prototypes": { "Crate": { "thresholds": [
            { "trigger": { "damage": 1 }, "behaviors": [ { "spawn": { "Plank": { "min": 2, "max": 2 } } } ] }
        ] } } }"#;
        let catalog = PrototypeCatalog::from_json(json).unwrap();
        let crate_thresholds = catalog.thresholds(&PrototypeId::from("Crate")).unwrap();

        match &crate_thresholds[0].behaviors[0] {
            Behavior::SpawnEntities { offset, .. } => assert_eq!(*offset, DEFAULT_SPAWN_OFFSET),
            other => panic!("expected spawn, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_type() {
        let json = r#"{ "prototypes": { "Wall": { "thresholds": [
            { "trigger": { "damageType": "Cold", "damage": 1 } }
        ] } } }"#;
        let err = PrototypeCatalog::from_json(json).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownDamageType { ref name, .. } if name == "Cold"));
        assert!(err.to_string().contains("prototype 'Wall' threshold 0"));
    }

    #[test]
    fn test_unknown_group() {
        let json = r#"{ "damageTypes": ["Heat"], "prototypes": { "Wall": { "thresholds": [
            { "trigger": { "and": [ { "damageGroup": "Burn", "damage": 1 } ] } }
        ] } } }"#;
        assert!(matches!(
            PrototypeCatalog::from_json(json),
            Err(ConfigError::UnknownDamageGroup { ref name, .. }) if name == "Burn"
        ));
    }

    #[test]
    fn test_group_member_must_be_declared() {
        let json = r#"{ "damageTypes": ["Blunt"], "damageGroups": { "Brute": ["Blunt", "Pierce"] } }"#;
        assert!(matches!(
            PrototypeCatalog::from_json(json),
            Err(ConfigError::UnknownDamageType { ref name, .. }) if name == "Pierce"
        ));
    }

    #[test]
    fn test_duplicate_type() {
        let json = r#"{ "damageTypes": ["Blunt", "Blunt"] }"#;
        assert!(matches!(
            PrototypeCatalog::from_json(json),
            Err(ConfigError::DuplicateDamageType(ref name)) if name == "Blunt"
        ));
    }

    #[test]
    fn test_too_many_damage_types() {
        let file = PrototypeFile {
            damage_types: (0..=u32::from(u16::MAX) + 1).map(|i| format!("T{i}")).collect(),
            ..PrototypeFile::default()
        };
        let err = PrototypeCatalog::from_file(file).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::TooManyIds { kind: "type", ref name } if name == "T65536"
        ));
        assert_eq!(err.to_string(), "too many damage types: 'T65536' exceeds 65536");
    }

    #[test]
    fn test_invalid_spawn_range() {
        let json = r#"{ "prototypes": { "Crate": { "thresholds": [
            { "trigger": { "damage": 1 }, "behaviors": [ { "spawn": { "Plank": { "min": 3, "max": 1 } } } ] }
        ] } } }"#;
        assert!(matches!(
            PrototypeCatalog::from_json(json),
            Err(ConfigError::InvalidSpawnRange { min: 3, max: 1, .. })
        ));
    }

    #[test]
    fn test_trivially_true_triggers_load() {
        let json = r#"{ "prototypes": { "Dust": { "thresholds": [
            { "trigger": { "and": [] } },
            { "trigger": { "damage": 0 } }
        ] } } }"#;
        let catalog = PrototypeCatalog::from_json(json).unwrap();
        assert_eq!(catalog.thresholds(&PrototypeId::from("Dust")).unwrap().len(), 2);
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            PrototypeCatalog::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = PrototypeCatalog::from_path("/nonexistent/prototypes.json").unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
    }
}
