//! Damage ledgers and the damage-changed notification.
//!
//! The damage arithmetic itself belongs to the host; this module only
//! provides what the threshold engine reads and listens to:
//!
//! - [`DamageLedger`]: read-only total / per-type / per-group queries
//! - [`DamageState`]: in-memory ledger with O(1) snapshots
//! - [`DamageableStore`]: per-entity ledgers that raise [`DamageChanged`]
//! - [`DamageSpecifier`]: a per-type damage or healing delta

mod ledger;
mod specifier;
mod store;

pub use ledger::{DamageLedger, DamageState};
pub use specifier::DamageSpecifier;
pub use store::{DamageChanged, DamageableStore};
