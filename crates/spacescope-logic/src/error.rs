//! Error types for catalog lookups and configuration validation.

use thiserror::Error;

/// Errors raised by the pure logic layer.
#[derive(Debug, Error)]
pub enum LogicError {
    /// An embedded catalog failed to parse.
    #[error("failed to parse {name} catalog: {source}")]
    Catalog {
        name: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown city: {0}")]
    UnknownCity(String),

    #[error("unknown constellation: {0}")]
    UnknownConstellation(String),

    #[error("unknown mission: {0}")]
    UnknownMission(String),

    #[error("unknown learning topic: {0}")]
    UnknownLearningTopic(String),

    #[error("unknown event: {0}")]
    UnknownEvent(String),

    /// A configuration value can't drive the simulation.
    #[error("invalid config `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}

pub type Result<T, E = LogicError> = std::result::Result<T, E>;
