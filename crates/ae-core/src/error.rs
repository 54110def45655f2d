//! Engine error type.
//!
//! Motion and planning failures are never errors: they are reported as
//! `ActionStatus` values.  `EngineError` covers environmental problems
//! (malformed telemetry, bad configuration) that the caller must handle.

use thiserror::Error;

use crate::AgentId;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("agent {0} missing from tick telemetry")]
    AgentNotFound(AgentId),

    #[error("agent {0} registered twice")]
    DuplicateAgent(AgentId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `ae-*` crates.
pub type EngineResult<T> = Result<T, EngineError>;
