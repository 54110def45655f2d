//! Turn to face a position or an object.

use ae_command::{CommandBatch, TickTelemetry};
use ae_core::{ObjectId, Vec3, signed_angle};

use crate::{ActionCore, ActionStatus, DrivePlan, Motion, MotionTarget, TickContext};

/// Something an agent can face or walk to.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Target {
    Position(Vec3),
    Object(ObjectId),
}

impl Target {
    /// Current world position, or `None` for an object the telemetry does
    /// not report.
    pub fn resolve(self, telemetry: &TickTelemetry) -> Option<Vec3> {
        match self {
            Target::Position(p) => Some(p),
            Target::Object(id)  => telemetry.object_position(id),
        }
    }
}

impl From<Vec3> for Target {
    fn from(p: Vec3) -> Self {
        Target::Position(p)
    }
}

impl From<ObjectId> for Target {
    fn from(id: ObjectId) -> Self {
        Target::Object(id)
    }
}

/// Resolves the angle at `initialize` and then runs as a plain turn.
#[derive(Clone, Debug)]
pub struct TurnTo {
    target:     Target,
    aligned_at: f32,
    plan:       DrivePlan,
    motion:     Option<Motion>,
}

impl TurnTo {
    pub fn new(target: Target, aligned_at: f32, plan: DrivePlan) -> Self {
        Self { target, aligned_at, plan, motion: None }
    }

    #[inline]
    pub fn target(&self) -> Target {
        self.target
    }

    /// The turn in progress; `None` before `initialize` or when the target
    /// could not be resolved.
    #[inline]
    pub fn motion(&self) -> Option<&Motion> {
        self.motion.as_ref()
    }

    pub(crate) fn initialize(&mut self, core: &mut ActionCore, ctx: &mut TickContext<'_>) -> CommandBatch {
        let Some(position) = self.target.resolve(ctx.telemetry) else {
            core.end(ActionStatus::FailedToMove);
            return CommandBatch::new();
        };
        let pose = ctx.dynamic.pose();
        let angle = signed_angle(pose.forward, position - pose.position);
        let motion = self.motion.insert(Motion::new(MotionTarget::angle(angle), self.aligned_at, &self.plan));
        motion.initialize(core, ctx)
    }

    pub(crate) fn ongoing(&mut self, core: &mut ActionCore, ctx: &mut TickContext<'_>) -> CommandBatch {
        match self.motion.as_mut() {
            Some(motion) => motion.ongoing(core, ctx),
            None => CommandBatch::new(),
        }
    }

    pub(crate) fn finalize(&mut self, ctx: &mut TickContext<'_>) -> CommandBatch {
        match self.motion.as_mut() {
            Some(motion) => motion.finalize(ctx),
            None => CommandBatch::new(),
        }
    }
}
