//! Damage triggers.
//!
//! Triggers decide *whether* a threshold's condition currently holds. They
//! know nothing about edges or hysteresis; that lives in
//! [`crate::thresholds`].
//!
//! ## Example Usage
//!
//! ```
//! use std::sync::Arc;
//! use destructible::core::DamageCatalog;
//! use destructible::damage::{DamageSpecifier, DamageState};
//! use destructible::triggers::Trigger;
//!
//! let catalog = Arc::new(DamageCatalog::new().with_type("Blunt").with_type("Slash"));
//! let blunt = catalog.type_id("Blunt").unwrap();
//! let slash = catalog.type_id("Slash").unwrap();
//!
//! // "Blunt and Slash both at least 10"
//! let trigger = Trigger::by_type(blunt, 10).and(Trigger::by_type(slash, 10));
//!
//! let mut ledger = DamageState::new(catalog);
//! ledger.apply(&DamageSpecifier::single(blunt, 20));
//! assert!(!trigger.evaluate(&ledger));
//!
//! ledger.apply(&DamageSpecifier::single(slash, 10));
//! assert!(trigger.evaluate(&ledger));
//! ```

mod trigger;

pub use trigger::Trigger;
