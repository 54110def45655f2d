//! Grasp and drop.

use ae_command::{Command, CommandBatch};
use ae_core::{Arm, ObjectId, Vec3};

use crate::{ActionCore, ActionStatus, TickContext};

/// Displacement per tick below which a dropped object has come to rest.
const AT_REST: f32 = 0.001;
/// A dropped object below this height fell out of the scene.
const FELL_BELOW: f32 = -0.1;

/// Attach an object to a hand.  The backend decides whether the hand is
/// close enough; the action checks the held slot on the next tick.
#[derive(Clone, Debug)]
pub struct Grasp {
    object: ObjectId,
    arm:    Arm,
}

impl Grasp {
    pub fn new(object: ObjectId, arm: Arm) -> Self {
        Self { object, arm }
    }

    #[inline]
    pub fn object(&self) -> ObjectId {
        self.object
    }

    #[inline]
    pub fn arm(&self) -> Arm {
        self.arm
    }

    pub(crate) fn initialize(&mut self, core: &mut ActionCore, ctx: &mut TickContext<'_>) -> CommandBatch {
        let mut out = CommandBatch::new();
        if ctx.dynamic.held_object(self.arm).is_some() {
            core.end(ActionStatus::AlreadyHolding);
            return out;
        }
        out.push(Command::Grasp { agent: ctx.id(), arm: self.arm, object: self.object });
        out
    }

    pub(crate) fn ongoing(&mut self, core: &mut ActionCore, ctx: &mut TickContext<'_>) -> CommandBatch {
        if ctx.dynamic.held_object(self.arm) == Some(self.object) {
            core.end(ActionStatus::Success);
        } else {
            core.end(ActionStatus::FailedToGrasp);
        }
        CommandBatch::new()
    }
}

/// Let go of whatever an arm holds and wait for it to land.
#[derive(Clone, Debug)]
pub struct DropObject {
    arm:       Arm,
    max_ticks: u32,
    object:    Option<ObjectId>,
    last:      Option<Vec3>,
    ticks:     u32,
}

impl DropObject {
    pub fn new(arm: Arm, max_ticks: u32) -> Self {
        Self { arm, max_ticks, object: None, last: None, ticks: 0 }
    }

    #[inline]
    pub fn arm(&self) -> Arm {
        self.arm
    }

    /// The object being dropped, known after `initialize`.
    #[inline]
    pub fn object(&self) -> Option<ObjectId> {
        self.object
    }

    pub(crate) fn initialize(&mut self, core: &mut ActionCore, ctx: &mut TickContext<'_>) -> CommandBatch {
        let mut out = CommandBatch::new();
        let Some(object) = ctx.dynamic.held_object(self.arm) else {
            core.end(ActionStatus::NotHolding);
            return out;
        };
        self.object = Some(object);
        self.last = ctx.telemetry.object_position(object);
        out.push(Command::Drop { agent: ctx.id(), arm: self.arm, object });
        out
    }

    pub(crate) fn ongoing(&mut self, core: &mut ActionCore, ctx: &mut TickContext<'_>) -> CommandBatch {
        self.ticks += 1;
        let position = self.object.and_then(|o| ctx.telemetry.object_position(o));
        match (position, self.last) {
            // Gone from the scene.
            (None, _) => core.end(ActionStatus::Success),
            (Some(p), _) if p.y < FELL_BELOW => core.end(ActionStatus::Success),
            (Some(p), Some(last)) if p.distance(last) < AT_REST => core.end(ActionStatus::Success),
            _ if self.ticks >= self.max_ticks => core.end(ActionStatus::StillDropping),
            _ => {}
        }
        self.last = position;
        CommandBatch::new()
    }
}
