//! Reference world collaborator.
//!
//! Real hosts implement [`crate::behaviors::DestructibleWorld`] over their
//! own entity framework. [`SimWorld`] is the in-memory implementation used
//! by the simulation host, tests and tooling.

mod sim;

pub use sim::{EntityRecord, PlayedSound, SimWorld};
