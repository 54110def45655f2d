use ae_core::{AgentId, EngineError, ObjectId};
use thiserror::Error;

/// Failures reported by a simulation backend while executing a batch.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("command addresses unknown agent {0}")]
    UnknownAgent(AgentId),

    #[error("command addresses unknown object {0}")]
    UnknownObject(ObjectId),

    #[error("backend rejected the batch: {0}")]
    Rejected(String),
}

pub type BackendResult<T> = Result<T, BackendError>;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("agents still active after {ticks} ticks")]
    Timeout { ticks: u64 },
}

pub type SessionResult<T> = Result<T, SessionError>;
