//! Thresholds: triggers with hysteresis and behaviors.
//!
//! ## State Machine
//!
//! Each threshold instance moves between three states:
//!
//! | state                 | armed | ever_fired |
//! |-----------------------|-------|------------|
//! | Unarmed, never fired  | false | false      |
//! | Armed, fired          | true  | true       |
//! | Unarmed, fired        | false | true       |
//!
//! On each evaluation: a false condition disarms; a true condition while
//! armed does nothing; a true condition while unarmed fires, unless the
//! instance is one-shot and has fired before.
//!
//! Healing can only disarm, so it never fires anything.
//!
//! ## Example Usage
//!
//! ```
//! use std::sync::Arc;
//! use destructible::core::DamageCatalog;
//! use destructible::damage::{DamageSpecifier, DamageState};
//! use destructible::thresholds::{Threshold, ThresholdCollection};
//! use destructible::triggers::Trigger;
//!
//! let catalog = Arc::new(DamageCatalog::new().with_type("Blunt"));
//! let blunt = catalog.type_id("Blunt").unwrap();
//! let mut ledger = DamageState::new(catalog);
//!
//! let mut thresholds = ThresholdCollection::from_thresholds([Threshold::new(Trigger::total(20))]);
//!
//! ledger.apply(&DamageSpecifier::single(blunt, 25));
//! assert!(thresholds.evaluate(0, &ledger).fired());
//! assert!(!thresholds.evaluate(0, &ledger).fired()); // still armed
//!
//! ledger.apply(&DamageSpecifier::heal(blunt, 25));
//! assert!(!thresholds.evaluate(0, &ledger).fired()); // disarms
//!
//! ledger.apply(&DamageSpecifier::single(blunt, 25));
//! assert!(thresholds.evaluate(0, &ledger).fired()); // fires again
//! ```

mod collection;
mod threshold;

pub use collection::{ThresholdCollection, ThresholdSet};
pub use threshold::{Evaluation, Threshold, ThresholdState};
