//! Leaf motions: move by a distance or turn by an angle.
//!
//! Progress is measured against the pose captured at `initialize`.  A motion
//! has arrived when
//!
//! ```text
//! remaining < arrived_at  ||  traversed >= |target| - arrived_at
//! ```
//!
//! The second branch guarantees termination with `arrived_at = 0` and
//! accepts slight overshoot.
//!
//! Each ongoing tick checks, in order: the previous tick's overlap reply
//! (only while `avoid` is set), arrival, new collisions, stall, and the
//! one-shot brake.

use ae_command::{Command, CommandBatch, Pose, QueryKind};
use ae_core::{QueryId, wrap_degrees};

use crate::{ActionCore, ActionStatus, Drive, DrivePlan, TickContext};

/// Overlap replies older than this many ticks are given up on.
const MAX_OVERLAP_AGE: u64 = 5;

/// A signed distance (metres, negative is backwards) or angle (degrees,
/// positive is clockwise).
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MotionTarget {
    Distance(f32),
    Angle(f32),
}

impl MotionTarget {
    /// An angle target, clamped to a half turn either way.
    pub fn angle(degrees: f32) -> Self {
        MotionTarget::Angle(degrees.clamp(-180.0, 180.0))
    }

    #[inline]
    pub fn value(self) -> f32 {
        match self {
            MotionTarget::Distance(v) | MotionTarget::Angle(v) => v,
        }
    }

    #[inline]
    pub fn magnitude(self) -> f32 {
        self.value().abs()
    }

    /// -1, 0 or 1.
    pub fn sign(self) -> i8 {
        let v = self.value();
        if v > 0.0 {
            1
        } else if v < 0.0 {
            -1
        } else {
            0
        }
    }
}

#[derive(Copy, Clone, Debug)]
struct Progress {
    traversed: f32,
    remaining: f32,
}

impl Progress {
    fn arrived(self, magnitude: f32, arrived_at: f32) -> bool {
        self.remaining < arrived_at || self.traversed >= magnitude - arrived_at
    }
}

#[derive(Clone, Debug)]
pub struct Motion {
    target:      MotionTarget,
    arrived_at:  f32,
    drive:       Drive,
    origin:      Pose,
    last:        Pose,
    still_ticks: u32,
    braking:     bool,
    overlaps:    Vec<QueryId>,
}

impl Motion {
    pub fn new(target: MotionTarget, arrived_at: f32, plan: &DrivePlan) -> Self {
        Self {
            target,
            arrived_at,
            drive:       plan.resolve(target),
            origin:      Pose::default(),
            last:        Pose::default(),
            still_ticks: 0,
            braking:     false,
            overlaps:    Vec::new(),
        }
    }

    #[inline]
    pub fn target(&self) -> MotionTarget {
        self.target
    }

    #[inline]
    pub fn arrived_at(&self) -> f32 {
        self.arrived_at
    }

    #[inline]
    pub fn drive(&self) -> &Drive {
        &self.drive
    }

    /// `true` once the one-shot brake has been applied.
    #[inline]
    pub fn is_braking(&self) -> bool {
        self.braking
    }

    /// Distance or angle covered so far.
    pub fn traversed(&self, pose: &Pose) -> f32 {
        self.progress(pose).traversed
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    pub(crate) fn initialize(&mut self, core: &mut ActionCore, ctx: &mut TickContext<'_>) -> CommandBatch {
        let pose = *ctx.dynamic.pose();
        self.origin = pose;
        self.last = pose;
        core.lease.exclude_all(ctx.policy, ctx.dynamic.held().iter());

        let mut out = CommandBatch::new();
        if self.target.magnitude() <= self.arrived_at {
            core.end(ActionStatus::Success);
            return out;
        }
        out.extend(self.drive.start(ctx.id(), self.target));
        self.request_overlap(ctx, &mut out);
        out
    }

    pub(crate) fn ongoing(&mut self, core: &mut ActionCore, ctx: &mut TickContext<'_>) -> CommandBatch {
        let mut out = CommandBatch::new();
        if ctx.policy.avoid && self.poll_overlaps(ctx) {
            core.end(ActionStatus::DetectedObstacle);
            return out;
        }

        let progress = self.progress(ctx.dynamic.pose());
        if progress.arrived(self.target.magnitude(), self.arrived_at) {
            core.end(ActionStatus::Success);
            return out;
        }
        if !ctx.dynamic.collision_enters(ctx.policy).is_empty() {
            core.end(ActionStatus::Collision);
            return out;
        }
        if self.stalled(ctx) {
            core.end(ActionStatus::FailedToMove);
            return out;
        }

        if !self.braking {
            if let Some(brake_at) = self.drive.brake_at() {
                if progress.remaining < brake_at {
                    self.braking = true;
                    out.extend(self.drive.brake(ctx.id()));
                }
            }
        }
        self.request_overlap(ctx, &mut out);
        out
    }

    pub(crate) fn finalize(&mut self, ctx: &mut TickContext<'_>) -> CommandBatch {
        for id in self.overlaps.drain(..) {
            ctx.queries.cancel(id);
        }
        self.drive.stop(ctx.id()).into_iter().collect()
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn progress(&self, pose: &Pose) -> Progress {
        match self.target {
            MotionTarget::Distance(d) => {
                let destination = self.origin.position + self.origin.forward.flat().normalized() * d;
                Progress {
                    traversed: pose.position.planar_distance(self.origin.position),
                    remaining: pose.position.planar_distance(destination),
                }
            }
            MotionTarget::Angle(a) => {
                let delta = wrap_degrees(pose.yaw_degrees() - self.origin.yaw_degrees());
                Progress {
                    traversed: delta * a.signum(),
                    remaining: wrap_degrees(a - delta).abs(),
                }
            }
        }
    }

    fn stalled(&mut self, ctx: &TickContext<'_>) -> bool {
        let pose = *ctx.dynamic.pose();
        let moved = match self.target {
            MotionTarget::Distance(_) => pose.position.planar_distance(self.last.position),
            MotionTarget::Angle(_)    => wrap_degrees(pose.yaw_degrees() - self.last.yaw_degrees()).abs(),
        };
        self.last = pose;
        if moved < ctx.config.stall_epsilon {
            self.still_ticks += 1;
        } else {
            self.still_ticks = 0;
        }
        self.still_ticks >= ctx.config.stall_ticks
    }

    /// Cast the overlap box ahead of the direction of travel.
    fn request_overlap(&mut self, ctx: &mut TickContext<'_>, out: &mut CommandBatch) {
        if !ctx.policy.avoid {
            return;
        }
        let pose = ctx.dynamic.pose();
        let direction = match self.target {
            MotionTarget::Distance(d) => pose.forward.flat().normalized() * d.signum(),
            MotionTarget::Angle(a)    => pose.right() * a.signum(),
        };
        let mut position = pose.position + direction * ctx.config.overlap_distance;
        position.y += ctx.config.overlap_half_extents.y;

        let query = ctx.queries.issue(QueryKind::Overlap, ctx.tick);
        self.overlaps.push(query);
        out.push(Command::RequestOverlap {
            query,
            half_extents: ctx.config.overlap_half_extents,
            position,
            rotation: pose.rotation,
        });
    }

    /// `true` if any delivered overlap reply is obstructed.  Replies that
    /// never arrive are cancelled after [`MAX_OVERLAP_AGE`] ticks.
    fn poll_overlaps(&mut self, ctx: &mut TickContext<'_>) -> bool {
        let telemetry = ctx.telemetry;
        let tick = ctx.tick;
        let policy = &*ctx.policy;
        let queries = &mut *ctx.queries;
        let mut hit = false;
        self.overlaps.retain(|&id| {
            if let Some(result) = queries.overlap(id, telemetry) {
                hit |= policy.is_obstructed(result);
                return false;
            }
            if queries.age(id, tick).is_none_or(|age| age > MAX_OVERLAP_AGE) {
                queries.cancel(id);
                return false;
            }
            true
        });
        hit
    }
}
