//! Errors reported by world collaborators while executing behaviors

use thiserror::Error;

use crate::core::{EntityId, PrototypeId};

/// A world operation requested by a behavior failed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum WorldError {
    #[error("unknown prototype {0}")]
    UnknownPrototype(PrototypeId),

    #[error("{0} does not exist")]
    MissingEntity(EntityId),
}
