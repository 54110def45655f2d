//! `ae-command` — the wire-level vocabulary between the action engine and
//! the simulation backend.
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`command`]     | `Command` (tagged record), `CommandBatch`                  |
//! | [`telemetry`]   | `TickTelemetry`, `AgentFrame`, `Pose`, `CollisionEvent`,   |
//! |                 | `OverlapResult`, `PathResult`                              |
//! | [`query`]       | `PendingQueries` — per-agent table of outstanding requests |
//!
//! Encoding (JSON, framing) is the transport's business; with the `serde`
//! feature every type here derives `Serialize`/`Deserialize`.

pub mod command;
pub mod query;
pub mod telemetry;

#[cfg(test)]
mod tests;

pub use command::{Command, CommandBatch};
pub use query::{PendingQueries, PendingQuery, QueryKind};
pub use telemetry::{
    AgentFrame, CollisionEvent, Contact, ContactPhase, Hands, HeldObjects, ObjectFrame,
    OverlapResult, PathResult, PathState, Pose, TickTelemetry,
};
