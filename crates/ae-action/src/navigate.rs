//! Waypoint navigation with the multi-agent yield protocol.
//!
//! ```text
//!            path ok                     last waypoint
//! GettingPath ──────▶ Following ─────────────────────▶ success
//!     ▲                   │ lower id near a higher-id peer
//!     │   re-path         ▼
//!     └────────────── Yielding (short backward move)
//! ```
//!
//! Obstacle avoidance is switched off for the whole navigation through the
//! action's policy lease and comes back when the action is finalized.

use ae_command::{Command, CommandBatch, QueryKind};
use ae_core::{AgentId, EngineConfig, QueryId, Vec3};
use tracing::debug;

use crate::{Action, ActionCore, ActionStatus, DrivePlan, TickContext, YieldRule};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NavigateState {
    GettingPath,
    Following,
    Yielding,
}

#[derive(Clone, Debug)]
pub struct Navigate {
    destination:  Vec3,
    arrived_at:   f32,
    aligned_at:   f32,
    plan:         DrivePlan,
    path_timeout: u64,
    backoff:      f32,
    yield_rule:   Option<YieldRule>,

    state:  NavigateState,
    query:  Option<QueryId>,
    path:   Vec<Vec3>,
    index:  usize,
    child:  Option<Box<Action>>,
    yields: u32,
}

impl Navigate {
    pub fn new(destination: Vec3, plan: DrivePlan, config: &EngineConfig) -> Self {
        Self {
            destination,
            arrived_at:   config.arrived_at,
            aligned_at:   config.aligned_at,
            plan,
            path_timeout: config.path_timeout_ticks,
            backoff:      config.yield_backoff,
            yield_rule:   Some(YieldRule::new(config.yield_distance)),
            state:        NavigateState::GettingPath,
            query:        None,
            path:         Vec::new(),
            index:        0,
            child:        None,
            yields:       0,
        }
    }

    /// Navigate alone: never yield to peers.
    pub fn without_yielding(mut self) -> Self {
        self.yield_rule = None;
        self
    }

    #[inline]
    pub fn destination(&self) -> Vec3 {
        self.destination
    }

    #[inline]
    pub fn state(&self) -> NavigateState {
        self.state
    }

    #[inline]
    pub fn is_yielding(&self) -> bool {
        self.state == NavigateState::Yielding
    }

    /// Waypoints of the path being followed; empty while getting a path.
    pub fn path(&self) -> &[Vec3] {
        &self.path
    }

    /// Index of the waypoint the current child is heading to.
    #[inline]
    pub fn waypoint_index(&self) -> usize {
        self.index
    }

    /// How many times this navigation has yielded.
    #[inline]
    pub fn yields(&self) -> u32 {
        self.yields
    }

    pub fn child(&self) -> Option<&Action> {
        self.child.as_deref()
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    pub(crate) fn initialize(&mut self, core: &mut ActionCore, ctx: &mut TickContext<'_>) -> CommandBatch {
        core.lease.set_avoid(ctx.policy, false);
        let mut out = CommandBatch::new();
        self.request_path(ctx, &mut out);
        out
    }

    pub(crate) fn ongoing(&mut self, core: &mut ActionCore, ctx: &mut TickContext<'_>) -> CommandBatch {
        let mut out = CommandBatch::new();
        match self.state {
            NavigateState::GettingPath => self.poll_path(core, ctx, &mut out),
            NavigateState::Following => {
                if let Some(peer) = self.must_yield(ctx) {
                    self.start_yield(peer, ctx, &mut out);
                } else {
                    if let Some(child) = self.child.as_mut() {
                        out.append(child.ongoing_step(ctx));
                    }
                    self.settle(core, ctx, &mut out);
                }
            }
            NavigateState::Yielding => {
                if let Some(child) = self.child.as_mut() {
                    out.append(child.ongoing_step(ctx));
                }
                self.settle_yield(ctx, &mut out);
            }
        }
        out
    }

    pub(crate) fn finalize(&mut self, ctx: &mut TickContext<'_>) -> CommandBatch {
        if let Some(query) = self.query.take() {
            ctx.queries.cancel(query);
        }
        match self.child.take() {
            Some(mut child) if !child.is_finalized() => child.finalize(ctx),
            _ => CommandBatch::new(),
        }
    }

    // ── GettingPath ───────────────────────────────────────────────────────

    fn request_path(&mut self, ctx: &mut TickContext<'_>, out: &mut CommandBatch) {
        let query = ctx.queries.issue(QueryKind::Path, ctx.tick);
        self.query = Some(query);
        self.state = NavigateState::GettingPath;
        out.push(Command::RequestPath {
            query,
            origin:      ctx.dynamic.position(),
            destination: self.destination,
        });
    }

    fn poll_path(&mut self, core: &mut ActionCore, ctx: &mut TickContext<'_>, out: &mut CommandBatch) {
        let Some(query) = self.query else {
            core.end(ActionStatus::FailedToPathfind);
            return;
        };
        let Some(result) = ctx.queries.path(query, ctx.telemetry) else {
            if ctx.queries.age(query, ctx.tick).is_none_or(|age| age > self.path_timeout) {
                ctx.queries.cancel(query);
                self.query = None;
                debug!(agent = %ctx.id(), %query, "path reply timed out");
                core.end(ActionStatus::FailedToPathfind);
            }
            return;
        };
        self.query = None;
        if !result.is_complete() {
            debug!(agent = %ctx.id(), state = ?result.state, "no complete path");
            core.end(ActionStatus::FailedToPathfind);
            return;
        }
        if result.waypoints.len() < 2 {
            core.end(ActionStatus::Success);
            return;
        }
        self.path = result.waypoints.clone();
        self.index = 1;
        self.state = NavigateState::Following;
        self.spawn_leg(ctx, out);
        self.settle(core, ctx, out);
    }

    // ── Following ─────────────────────────────────────────────────────────

    fn spawn_leg(&mut self, ctx: &mut TickContext<'_>, out: &mut CommandBatch) {
        let mut leg = Action::move_to(self.path[self.index], self.arrived_at, self.aligned_at, self.plan.clone());
        out.append(leg.initialize(ctx));
        self.child = Some(Box::new(leg));
    }

    /// React to a finished leg: advance to the next waypoint, finish, yield,
    /// or adopt the leg's failure.
    fn settle(&mut self, core: &mut ActionCore, ctx: &mut TickContext<'_>, out: &mut CommandBatch) {
        loop {
            let Some(status) = self.child.as_ref().map(|c| c.status()) else {
                return;
            };
            if status.is_ongoing() {
                return;
            }
            if status.is_failure() {
                if let Some(peer) = self.must_yield(ctx) {
                    self.start_yield(peer, ctx, out);
                    return;
                }
            }
            if let Some(mut child) = self.child.take() {
                out.append(child.finalize(ctx));
            }
            if status.is_failure() {
                debug!(agent = %ctx.id(), waypoint = self.index, %status, "navigation leg failed");
                core.end(status);
                return;
            }
            if self.index + 1 >= self.path.len() {
                core.end(ActionStatus::Success);
                return;
            }
            self.index += 1;
            self.spawn_leg(ctx, out);
        }
    }

    // ── Yielding ──────────────────────────────────────────────────────────

    fn must_yield(&self, ctx: &TickContext<'_>) -> Option<AgentId> {
        self.yield_rule?.yield_to(ctx.id(), ctx.dynamic.position(), ctx.peers)
    }

    fn start_yield(&mut self, peer: AgentId, ctx: &mut TickContext<'_>, out: &mut CommandBatch) {
        if let Some(mut child) = self.child.take() {
            if !child.is_finalized() {
                out.append(child.finalize(ctx));
            }
        }
        self.yields += 1;
        self.state = NavigateState::Yielding;
        debug!(agent = %ctx.id(), %peer, yields = self.yields, "yielding");

        let mut backoff = Action::move_by(-self.backoff, self.arrived_at, &self.plan);
        out.append(backoff.initialize(ctx));
        self.child = Some(Box::new(backoff));
        self.settle_yield(ctx, out);
    }

    /// Once the backward move has ended, however it ended, ask for a new path
    /// from where the agent stands.
    fn settle_yield(&mut self, ctx: &mut TickContext<'_>, out: &mut CommandBatch) {
        let Some(child) = self.child.as_mut() else {
            return;
        };
        if child.status().is_ongoing() {
            return;
        }
        out.append(child.finalize(ctx));
        self.child = None;
        self.path.clear();
        self.index = 0;
        debug!(agent = %ctx.id(), "re-pathing after yield");
        self.request_path(ctx, out);
    }
}
