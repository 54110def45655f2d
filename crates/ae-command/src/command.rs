//! The command batch protocol consumed by the simulation backend.
//!
//! A tick's output is one ordered [`CommandBatch`].  The backend executes the
//! records in order, steps physics once, and replies with a
//! [`TickTelemetry`][crate::TickTelemetry].

use ae_core::{AgentId, Arm, ObjectId, Quat, QueryId, Vec3};

/// One discrete instruction for the backend.
///
/// With the `serde` feature the enum is internally tagged by `"$type"`,
/// which is the record shape the wire transport expects.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "$type", rename_all = "snake_case"))]
pub enum Command {
    // ── Legged locomotion ─────────────────────────────────────────────────
    /// Loop a root-motion walk cycle until `StopMotion`.
    Walk {
        agent:           AgentId,
        animation:       String,
        forward:         bool,
        meters_per_tick: f32,
    },
    /// Turn in place until `StopMotion`.  Positive is clockwise.
    Turn {
        agent:            AgentId,
        degrees_per_tick: f32,
    },
    /// Stop any walk, turn, or animation.
    StopMotion { agent: AgentId },
    /// Play a named animation once.
    PlayAnimation {
        agent:   AgentId,
        name:    String,
        forward: bool,
    },

    // ── Wheelchair actuation ──────────────────────────────────────────────
    SetMotorTorque {
        agent: AgentId,
        left:  f32,
        right: f32,
    },
    SetBrakeTorque {
        agent: AgentId,
        left:  f32,
        right: f32,
    },
    SetSteerAngle {
        agent: AgentId,
        angle: f32,
    },

    // ── Queries (results arrive in a later tick's telemetry) ──────────────
    /// Cast a box and report walls and objects inside it.
    RequestOverlap {
        query:        QueryId,
        half_extents: Vec3,
        position:     Vec3,
        rotation:     Quat,
    },
    /// Ask the navigation mesh for a path.  The requester is `query.agent`.
    RequestPath {
        query:       QueryId,
        origin:      Vec3,
        destination: Vec3,
    },

    // ── Arms ──────────────────────────────────────────────────────────────
    ReachFor {
        agent:         AgentId,
        arm:           Arm,
        target:        Vec3,
        duration_secs: f32,
        max_distance:  f32,
    },
    ResetArm {
        agent:         AgentId,
        arm:           Arm,
        duration_secs: f32,
    },
    StopArm {
        agent: AgentId,
        arm:   Arm,
    },
    Grasp {
        agent:  AgentId,
        arm:    Arm,
        object: ObjectId,
    },
    Drop {
        agent:  AgentId,
        arm:    Arm,
        object: ObjectId,
    },
}

impl Command {
    /// The agent this command addresses (the requester, for queries).
    pub fn agent(&self) -> AgentId {
        match self {
            Command::Walk { agent, .. }
            | Command::Turn { agent, .. }
            | Command::StopMotion { agent }
            | Command::PlayAnimation { agent, .. }
            | Command::SetMotorTorque { agent, .. }
            | Command::SetBrakeTorque { agent, .. }
            | Command::SetSteerAngle { agent, .. }
            | Command::ReachFor { agent, .. }
            | Command::ResetArm { agent, .. }
            | Command::StopArm { agent, .. }
            | Command::Grasp { agent, .. }
            | Command::Drop { agent, .. } => *agent,
            Command::RequestOverlap { query, .. } | Command::RequestPath { query, .. } => query.agent,
        }
    }

    /// `true` for commands that set a body in motion.  Stop, brake, and
    /// query records are not motion.
    pub fn is_motion(&self) -> bool {
        match self {
            Command::Walk { .. }
            | Command::Turn { .. }
            | Command::PlayAnimation { .. }
            | Command::ReachFor { .. }
            | Command::ResetArm { .. } => true,
            Command::SetMotorTorque { left, right, .. } => *left != 0.0 || *right != 0.0,
            _ => false,
        }
    }
}

// ── CommandBatch ──────────────────────────────────────────────────────────────

/// An ordered sequence of commands for one tick.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CommandBatch(Vec<Command>);

impl CommandBatch {
    #[inline]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    #[inline]
    pub fn push(&mut self, command: Command) {
        self.0.push(command);
    }

    /// Append every command of `other`, preserving order.
    #[inline]
    pub fn append(&mut self, mut other: CommandBatch) {
        self.0.append(&mut other.0);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Command> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Command] {
        &self.0
    }

    /// Number of motion commands (see [`Command::is_motion`]).
    pub fn motion_count(&self) -> usize {
        self.0.iter().filter(|c| c.is_motion()).count()
    }
}

impl From<Vec<Command>> for CommandBatch {
    fn from(v: Vec<Command>) -> Self {
        Self(v)
    }
}

impl FromIterator<Command> for CommandBatch {
    fn from_iter<I: IntoIterator<Item = Command>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Command> for CommandBatch {
    fn extend<I: IntoIterator<Item = Command>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for CommandBatch {
    type Item = Command;
    type IntoIter = std::vec::IntoIter<Command>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a CommandBatch {
    type Item = &'a Command;
    type IntoIter = std::slice::Iter<'a, Command>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
