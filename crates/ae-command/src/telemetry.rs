//! Tick telemetry produced by the simulation backend.
//!
//! Telemetry for tick *n* is only available when computing commands for
//! tick *n + 1*; query results issued during tick *n* therefore appear one
//! tick later, tagged with the [`QueryId`] they answer.

use ae_core::{AgentId, Arm, BodyPartId, ObjectId, Quat, QueryId, Tick, Vec3};

// ── Pose ──────────────────────────────────────────────────────────────────────

/// Position, rotation, and forward vector of an agent.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
    pub forward:  Vec3,
}

impl Pose {
    /// A pose standing at `position` facing `yaw_deg`.
    pub fn new(position: Vec3, yaw_deg: f32) -> Self {
        let rotation = Quat::from_yaw(yaw_deg);
        Self { position, rotation, forward: rotation.rotate(Vec3::FORWARD) }
    }

    #[inline]
    pub fn yaw_degrees(&self) -> f32 {
        self.forward.yaw_degrees()
    }

    /// Unit vector pointing to the agent's right.
    #[inline]
    pub fn right(&self) -> Vec3 {
        Vec3::from_yaw(self.yaw_degrees() + 90.0)
    }
}

// ── Collisions ────────────────────────────────────────────────────────────────

/// What a body part touched.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Contact {
    /// Static scene geometry.  `floor` distinguishes the floor from walls.
    Environment { floor: bool },
    Object(ObjectId),
    Agent(AgentId),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContactPhase {
    Enter,
    Stay,
    Exit,
}

/// One collision event on one of the agent's body parts since the previous tick.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CollisionEvent {
    pub body_part: BodyPartId,
    pub contact:   Contact,
    pub phase:     ContactPhase,
}

// ── Held objects / hands ──────────────────────────────────────────────────────

/// Objects currently held, per arm.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeldObjects {
    pub left:  Option<ObjectId>,
    pub right: Option<ObjectId>,
}

impl HeldObjects {
    #[inline]
    pub fn get(&self, arm: Arm) -> Option<ObjectId> {
        match arm {
            Arm::Left  => self.left,
            Arm::Right => self.right,
        }
    }

    #[inline]
    pub fn set(&mut self, arm: Arm, object: Option<ObjectId>) {
        match arm {
            Arm::Left  => self.left = object,
            Arm::Right => self.right = object,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.left.into_iter().chain(self.right)
    }

    /// The arm holding `object`, if any.
    pub fn arm_of(&self, object: ObjectId) -> Option<Arm> {
        Arm::BOTH.into_iter().find(|&a| self.get(a) == Some(object))
    }
}

/// World-space hand positions.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hands {
    pub left:  Vec3,
    pub right: Vec3,
}

impl Hands {
    #[inline]
    pub fn get(&self, arm: Arm) -> Vec3 {
        match arm {
            Arm::Left  => self.left,
            Arm::Right => self.right,
        }
    }
}

// ── AgentFrame ────────────────────────────────────────────────────────────────

/// Everything the backend reports about one agent for one tick.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentFrame {
    pub agent:      AgentId,
    pub pose:       Pose,
    pub collisions: Vec<CollisionEvent>,
    pub held:       HeldObjects,
    pub hands:      Hands,
    /// `false` while a scripted motion (animation, arm IK) is still playing.
    pub motion_done: bool,
}

impl AgentFrame {
    /// A quiet frame: no collisions, nothing held, no scripted motion.
    pub fn new(agent: AgentId, pose: Pose) -> Self {
        Self {
            agent,
            pose,
            collisions:  Vec::new(),
            held:        HeldObjects::default(),
            hands:       Hands { left: pose.position, right: pose.position },
            motion_done: true,
        }
    }
}

/// Position of one scene object.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectFrame {
    pub object:   ObjectId,
    pub position: Vec3,
}

// ── Query results ─────────────────────────────────────────────────────────────

/// Reply to a `RequestOverlap`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OverlapResult {
    pub query:   QueryId,
    /// The box intersects a wall.
    pub walls:   bool,
    pub objects: Vec<ObjectId>,
    pub agents:  Vec<AgentId>,
}

/// Completion code of a path query.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PathState {
    Complete,
    /// The mesh reached somewhere, but not the destination.
    Partial,
    #[default]
    Invalid,
}

/// Reply to a `RequestPath`: the path itself.
///
/// `waypoints[0]` is the start position.  Immutable once received; navigation
/// consumes it through an index.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathResult {
    pub query:     QueryId,
    pub state:     PathState,
    pub waypoints: Vec<Vec3>,
}

impl PathResult {
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.state == PathState::Complete
    }
}

// ── TickTelemetry ─────────────────────────────────────────────────────────────

/// One backend reply.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickTelemetry {
    pub tick:          Tick,
    pub frame_dt_secs: f32,
    pub agents:        Vec<AgentFrame>,
    pub objects:       Vec<ObjectFrame>,
    pub overlaps:      Vec<OverlapResult>,
    pub paths:         Vec<PathResult>,
}

impl TickTelemetry {
    pub fn new(tick: Tick, frame_dt_secs: f32) -> Self {
        Self { tick, frame_dt_secs, ..Self::default() }
    }

    pub fn agent(&self, id: AgentId) -> Option<&AgentFrame> {
        self.agents.iter().find(|a| a.agent == id)
    }

    pub fn object_position(&self, id: ObjectId) -> Option<Vec3> {
        self.objects.iter().find(|o| o.object == id).map(|o| o.position)
    }

    pub fn overlap(&self, query: QueryId) -> Option<&OverlapResult> {
        self.overlaps.iter().find(|o| o.query == query)
    }

    pub fn path(&self, query: QueryId) -> Option<&PathResult> {
        self.paths.iter().find(|p| p.query == query)
    }
}
