//! Error types
//!
//! The simulation has no recoverable errors during play. `SimError` is a
//! fatal fault that stops the loop; `ConfigError` is raised before a session
//! starts.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to load or validate a [`crate::SimConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Fatal fault detected while advancing the simulation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("a boss is already alive; refusing to spawn a second one")]
    BossAlreadyPresent,
    #[error("player hit points {hp} outside 0..={max}")]
    PlayerHpOutOfRange { hp: u32, max: u32 },
    #[error("timer `{name}` went negative ({value})")]
    NegativeTimer { name: &'static str, value: f32 },
    #[error("{found:?} projectile stored in the {group} group")]
    AllegianceMismatch {
        group: &'static str,
        found: crate::sim::Allegiance,
    },
}
