//! Error types for prototype loading

use std::path::PathBuf;
use thiserror::Error;

use crate::core::PrototypeId;

/// Errors while loading or resolving prototype definitions.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON in {path}")]
    ParseFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse prototype definitions")]
    Parse(#[from] serde_json::Error),

    #[error("unknown damage type '{name}' in {context}")]
    UnknownDamageType { name: String, context: String },

    #[error("unknown damage group '{name}' in {context}")]
    UnknownDamageGroup { name: String, context: String },

    #[error("damage type '{0}' is declared more than once")]
    DuplicateDamageType(String),

    #[error("too many damage {kind}s: '{name}' exceeds {max}", max = u32::from(u16::MAX) + 1)]
    TooManyIds { kind: &'static str, name: String },

    #[error("invalid spawn range for '{spawn}' in {context}: min {min} > max {max}")]
    InvalidSpawnRange {
        spawn: PrototypeId,
        context: String,
        min: u32,
        max: u32,
    },

    #[error("unknown prototype '{0}'")]
    UnknownPrototype(PrototypeId),
}
