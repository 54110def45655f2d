//! Move to a position or object: turn to face it, then move the distance.

use ae_command::CommandBatch;

use crate::{Action, ActionCore, ActionStatus, DrivePlan, Target, TickContext};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveToPhase {
    Turning,
    Moving,
    Done,
}

/// Composite of a `TurnTo` child followed by a `MoveBy` child.
///
/// The move distance is measured when the turn finishes, so a moving object
/// target is tracked once.  A failing child ends the composite with the
/// child's status.
#[derive(Clone, Debug)]
pub struct MoveTo {
    target:     Target,
    arrived_at: f32,
    aligned_at: f32,
    plan:       DrivePlan,
    phase:      MoveToPhase,
    child:      Option<Box<Action>>,
}

impl MoveTo {
    pub fn new(target: Target, arrived_at: f32, aligned_at: f32, plan: DrivePlan) -> Self {
        Self { target, arrived_at, aligned_at, plan, phase: MoveToPhase::Turning, child: None }
    }

    #[inline]
    pub fn target(&self) -> Target {
        self.target
    }

    #[inline]
    pub fn phase(&self) -> MoveToPhase {
        self.phase
    }

    /// The child currently running.
    pub fn child(&self) -> Option<&Action> {
        self.child.as_deref()
    }

    pub(crate) fn initialize(&mut self, core: &mut ActionCore, ctx: &mut TickContext<'_>) -> CommandBatch {
        let mut child = Action::turn_to(self.target, self.aligned_at, self.plan.clone());
        let mut out = child.initialize(ctx);
        self.child = Some(Box::new(child));
        self.advance(core, ctx, &mut out);
        out
    }

    pub(crate) fn ongoing(&mut self, core: &mut ActionCore, ctx: &mut TickContext<'_>) -> CommandBatch {
        let mut out = match self.child.as_mut() {
            Some(child) => child.ongoing_step(ctx),
            None => CommandBatch::new(),
        };
        self.advance(core, ctx, &mut out);
        out
    }

    pub(crate) fn finalize(&mut self, ctx: &mut TickContext<'_>) -> CommandBatch {
        match self.child.take() {
            Some(mut child) if !child.is_finalized() => child.finalize(ctx),
            _ => CommandBatch::new(),
        }
    }

    /// Move past finished children until one is still running or the
    /// composite has ended.
    fn advance(&mut self, core: &mut ActionCore, ctx: &mut TickContext<'_>, out: &mut CommandBatch) {
        loop {
            let Some(child) = self.child.as_mut() else {
                return;
            };
            let status = child.status();
            if status.is_ongoing() {
                return;
            }
            out.append(child.finalize(ctx));
            self.child = None;
            if status.is_failure() {
                self.phase = MoveToPhase::Done;
                core.end(status);
                return;
            }
            match self.phase {
                MoveToPhase::Turning => {
                    let Some(position) = self.target.resolve(ctx.telemetry) else {
                        self.phase = MoveToPhase::Done;
                        core.end(ActionStatus::FailedToMove);
                        return;
                    };
                    let pose = ctx.dynamic.pose();
                    let offset = (position - pose.position).flat();
                    let mut distance = offset.length();
                    if offset.dot(pose.forward) < 0.0 {
                        distance = -distance;
                    }
                    let mut next = Action::move_by(distance, self.arrived_at, &self.plan);
                    out.append(next.initialize(ctx));
                    self.child = Some(Box::new(next));
                    self.phase = MoveToPhase::Moving;
                }
                MoveToPhase::Moving | MoveToPhase::Done => {
                    self.phase = MoveToPhase::Done;
                    core.end(ActionStatus::Success);
                    return;
                }
            }
        }
    }
}
