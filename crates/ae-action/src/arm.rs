//! Arm motions: reach for a target, or return to rest.
//!
//! Durations are nominal seconds at the reference framerate and are scaled
//! to the backend's framerate at `initialize`.  The backend reports the IK
//! motion finished through `motion_done`.

use ae_command::{Command, CommandBatch};
use ae_core::{Arm, Vec3};

use crate::{ActionCore, ActionStatus, Target, TickContext};

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ArmGoal {
    Reach {
        target:       Target,
        max_distance: f32,
        arrived_at:   f32,
    },
    Reset,
}

#[derive(Clone, Debug)]
pub struct ArmMotion {
    goal:          ArmGoal,
    arms:          Vec<Arm>,
    duration_secs: f32,
    /// Reach target resolved at `initialize`.
    resolved:      Option<Vec3>,
}

impl ArmMotion {
    pub fn reach(target: Target, arms: impl IntoIterator<Item = Arm>, max_distance: f32, arrived_at: f32, duration_secs: f32) -> Self {
        Self::new(ArmGoal::Reach { target, max_distance, arrived_at }, arms, duration_secs)
    }

    pub fn reset(arms: impl IntoIterator<Item = Arm>, duration_secs: f32) -> Self {
        Self::new(ArmGoal::Reset, arms, duration_secs)
    }

    fn new(goal: ArmGoal, arms: impl IntoIterator<Item = Arm>, duration_secs: f32) -> Self {
        let mut arms: Vec<Arm> = arms.into_iter().collect();
        arms.sort();
        arms.dedup();
        assert!(!arms.is_empty(), "arm motion without arms");
        Self { goal, arms, duration_secs, resolved: None }
    }

    #[inline]
    pub fn goal(&self) -> ArmGoal {
        self.goal
    }

    #[inline]
    pub fn arms(&self) -> &[Arm] {
        &self.arms
    }

    pub(crate) fn initialize(&mut self, core: &mut ActionCore, ctx: &mut TickContext<'_>) -> CommandBatch {
        core.lease.exclude_all(ctx.policy, ctx.dynamic.held().iter());
        let agent = ctx.id();
        let duration_secs = ctx.config.scaled_duration(self.duration_secs, ctx.telemetry.frame_dt_secs);
        let mut out = CommandBatch::new();
        match self.goal {
            ArmGoal::Reach { target, max_distance, .. } => {
                let Some(position) = target.resolve(ctx.telemetry) else {
                    core.end(ActionStatus::CannotReach);
                    return out;
                };
                if ctx.dynamic.position().distance(position) > max_distance {
                    core.end(ActionStatus::CannotReach);
                    return out;
                }
                self.resolved = Some(position);
                out.extend(self.arms.iter().map(|&arm| Command::ReachFor {
                    agent,
                    arm,
                    target: position,
                    duration_secs,
                    max_distance,
                }));
            }
            ArmGoal::Reset => {
                out.extend(self.arms.iter().map(|&arm| Command::ResetArm { agent, arm, duration_secs }));
            }
        }
        out
    }

    pub(crate) fn ongoing(&mut self, core: &mut ActionCore, ctx: &mut TickContext<'_>) -> CommandBatch {
        if !ctx.dynamic.collision_enters(ctx.policy).is_empty() {
            core.end(ActionStatus::Collision);
            return CommandBatch::new();
        }
        if !ctx.dynamic.motion_done() {
            return CommandBatch::new();
        }
        match (self.goal, self.resolved) {
            (ArmGoal::Reach { arrived_at, .. }, Some(target)) => {
                let reached = self.arms.iter().all(|&arm| ctx.dynamic.hand_position(arm).distance(target) <= arrived_at);
                core.end(if reached { ActionStatus::Success } else { ActionStatus::FailedToReach });
            }
            _ => core.end(ActionStatus::Success),
        }
        CommandBatch::new()
    }

    /// Stop any arm that is still moving.
    pub(crate) fn finalize(&mut self, core: &ActionCore, ctx: &mut TickContext<'_>) -> CommandBatch {
        let agent = ctx.id();
        if core.status() == ActionStatus::Success {
            return CommandBatch::new();
        }
        self.arms.iter().map(|&arm| Command::StopArm { agent, arm }).collect()
    }
}
