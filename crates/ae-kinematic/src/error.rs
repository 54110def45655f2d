use ae_core::{AgentId, ObjectId};
use thiserror::Error;

/// Errors raised while assembling a [`KinematicBackend`][crate::KinematicBackend].
///
/// Errors while stepping are `ae_sim::BackendError`s.
#[derive(Debug, Error)]
pub enum KinematicError {
    #[error("kinematic configuration error: {0}")]
    Config(String),

    #[error("agent {0} added twice")]
    DuplicateAgent(AgentId),

    #[error("object {0} added twice")]
    DuplicateObject(ObjectId),

    #[error("agent {agent} spawns outside the room or inside an obstacle at {position}")]
    BlockedSpawn { agent: AgentId, position: ae_core::Vec3 },
}

pub type KinematicResult<T> = Result<T, KinematicError>;
