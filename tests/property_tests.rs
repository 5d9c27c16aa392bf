//! Property tests for threshold firing.
//!
//! Random damage/heal sequences are driven through the engine and compared
//! against a straightforward model of the firing rule.

use std::sync::Arc;

use proptest::prelude::*;

use destructible::core::{DamageCatalog, DamageTypeId, EntityId, PrototypeId, SimulationConfig};
use destructible::damage::{DamageLedger, DamageSpecifier};
use destructible::prototypes::PrototypeCatalog;
use destructible::thresholds::Threshold;
use destructible::triggers::Trigger;
use destructible::{Position, Simulation};

#[derive(Clone, Debug)]
enum Op {
    Damage { kind: usize, amount: i64 },
    Heal { kind: usize, amount: i64 },
    HealAll,
    SetOneShot { index: usize, one_shot: bool },
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..2usize, 1..40i64).prop_map(|(kind, amount)| Op::Damage { kind, amount }),
        3 => (0..2usize, 1..40i64).prop_map(|(kind, amount)| Op::Heal { kind, amount }),
        1 => Just(Op::HealAll),
        1 => (0..4usize, any::<bool>()).prop_map(|(index, one_shot)| Op::SetOneShot { index, one_shot }),
    ]
}

/// Reference model of one threshold instance.
#[derive(Clone, Copy, Debug, Default)]
struct Model {
    armed: bool,
    ever_fired: bool,
    one_shot: bool,
}

impl Model {
    fn step(&mut self, condition: bool) -> bool {
        let fire = condition && !self.armed && !(self.one_shot && self.ever_fired);
        if !condition {
            self.armed = false;
        }
        if fire {
            self.armed = true;
            self.ever_fired = true;
        }
        fire
    }
}

struct Fixture {
    sim: Simulation,
    entity: EntityId,
    types: [DamageTypeId; 2],
    triggers: Vec<Trigger>,
}

fn fixture(once: [bool; 4]) -> Fixture {
    let catalog = Arc::new(DamageCatalog::new().with_group("Brute", ["Blunt", "Slash"]));
    let blunt = catalog.type_id("Blunt").unwrap();
    let slash = catalog.type_id("Slash").unwrap();
    let brute = catalog.group_id("Brute").unwrap();

    let triggers = vec![
        Trigger::total(20),
        Trigger::by_type(blunt, 30),
        Trigger::by_group(brute, 60),
        Trigger::all([Trigger::by_type(blunt, 10), Trigger::by_type(slash, 10)]),
    ];
    let thresholds = triggers
        .iter()
        .zip(once)
        .map(|(trigger, once)| {
            let threshold = Threshold::new(trigger.clone());
            if once { threshold.once() } else { threshold }
        })
        .collect();

    let prototypes = PrototypeCatalog::from_parts(catalog, [(PrototypeId::from("Target"), thresholds)]);
    let mut sim = Simulation::new(SimulationConfig::new("proptest"), prototypes);
    let entity = sim.spawn(&PrototypeId::from("Target"), Position::ORIGIN).unwrap();

    Fixture {
        sim,
        entity,
        types: [blunt, slash],
        triggers,
    }
}

proptest! {
    #[test]
    fn firing_matches_model(once in any::<[bool; 4]>(), ops in prop::collection::vec(op(), 1..60)) {
        let mut f = fixture(once);
        let mut models: Vec<Model> = once
            .iter()
            .map(|&one_shot| Model { one_shot, ..Model::default() })
            .collect();

        for op in ops {
            let pass = match op {
                Op::Damage { kind, amount } => {
                    f.sim.change_damage(f.entity, &DamageSpecifier::single(f.types[kind], amount))
                }
                Op::Heal { kind, amount } => {
                    f.sim.change_damage(f.entity, &DamageSpecifier::heal(f.types[kind], amount))
                }
                Op::HealAll => f.sim.heal_all(f.entity),
                Op::SetOneShot { index, one_shot } => {
                    f.sim.thresholds_mut(f.entity).unwrap().set_one_shot(index, one_shot);
                    models[index].one_shot = one_shot;
                    continue;
                }
            };

            // No notification means the ledger did not change.
            let Some(pass) = pass else { continue };

            let ledger = f.sim.ledger(f.entity).unwrap();
            let expected: Vec<usize> = models
                .iter_mut()
                .zip(&f.triggers)
                .enumerate()
                .filter_map(|(i, (model, trigger))| model.step(trigger.evaluate(ledger)).then_some(i))
                .collect();

            prop_assert_eq!(pass.fired_indices().collect::<Vec<_>>(), expected);
        }
    }

    #[test]
    fn healing_never_fires(ops in prop::collection::vec(op(), 1..60)) {
        let mut f = fixture([false; 4]);

        for op in ops {
            let before = f.sim.ledger(f.entity).unwrap().total_damage();
            let pass = match op {
                Op::Damage { kind, amount } => {
                    f.sim.change_damage(f.entity, &DamageSpecifier::single(f.types[kind], amount))
                }
                Op::Heal { kind, amount } => {
                    f.sim.change_damage(f.entity, &DamageSpecifier::heal(f.types[kind], amount))
                }
                Op::HealAll => f.sim.heal_all(f.entity),
                Op::SetOneShot { .. } => continue,
            };
            let after = f.sim.ledger(f.entity).unwrap().total_damage();

            if let Some(pass) = pass {
                if after < before {
                    prop_assert!(pass.is_empty());
                }
            }
        }
    }

    #[test]
    fn ledger_never_negative(ops in prop::collection::vec(op(), 1..60)) {
        let mut f = fixture([false; 4]);

        for op in ops {
            match op {
                Op::Damage { kind, amount } => {
                    f.sim.change_damage(f.entity, &DamageSpecifier::single(f.types[kind], amount));
                }
                Op::Heal { kind, amount } => {
                    f.sim.change_damage(f.entity, &DamageSpecifier::heal(f.types[kind], amount));
                }
                Op::HealAll => {
                    f.sim.heal_all(f.entity);
                }
                Op::SetOneShot { .. } => {}
            }

            let ledger = f.sim.ledger(f.entity).unwrap();
            prop_assert!(ledger.total_damage() >= 0);
            for ty in f.types {
                prop_assert!(ledger.amount_of_type(ty) >= 0);
            }
        }
    }
}
