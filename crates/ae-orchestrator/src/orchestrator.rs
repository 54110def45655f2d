//! The per-agent driver.

use ae_action::{Action, ActionStatus, DrivePlan, PeerIndex, PreviousAction, TickContext};
use ae_agent::{AgentDynamic, AgentStatic, CollisionDetection};
use ae_command::{CommandBatch, PendingQueries, TickTelemetry};
use ae_core::{AgentId, EngineConfig, EngineError, EngineResult};
use tracing::{debug, trace};

/// Owns one agent's static data, latest dynamic snapshot, collision policy,
/// query table, and current action, and advances the action once per tick.
///
/// # Lifecycle per tick
///
/// 1. Cache the agent's frame from telemetry as the new `AgentDynamic`.
/// 2. Finalize actions replaced by `assign` since the last tick.
/// 3. Initialize the current action, or step it if it is still ongoing.
/// 4. If it just turned terminal, finalize it in the same tick and keep a
///    [`PreviousAction`] snapshot for the repeat-failure guard.
///
/// Replacing an action therefore emits the old action's stop commands ahead
/// of the new action's start commands in one batch.
#[derive(Debug)]
pub struct Orchestrator {
    agent:     AgentStatic,
    config:    EngineConfig,
    plan:      DrivePlan,
    dynamic:   Option<AgentDynamic>,
    policy:    CollisionDetection,
    queries:   PendingQueries,
    action:    Option<Action>,
    /// Replaced actions awaiting finalize on the next tick.
    preempted: Vec<Action>,
    previous:  Option<PreviousAction>,
}

impl Orchestrator {
    pub fn new(agent: AgentStatic, config: EngineConfig) -> Self {
        let plan = DrivePlan::for_agent(agent.locomotion(), &config);
        let queries = PendingQueries::new(agent.id());
        Self {
            agent,
            config,
            plan,
            dynamic:   None,
            policy:    CollisionDetection::default(),
            queries,
            action:    None,
            preempted: Vec::new(),
            previous:  None,
        }
    }

    /// Start with a non-default collision policy.
    pub fn with_policy(mut self, policy: CollisionDetection) -> Self {
        self.policy = policy;
        self
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> AgentId {
        self.agent.id()
    }

    #[inline]
    pub fn agent(&self) -> &AgentStatic {
        &self.agent
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Actuation used for this agent's motions.
    #[inline]
    pub fn plan(&self) -> &DrivePlan {
        &self.plan
    }

    /// The snapshot cached at the last tick, if any tick has run.
    #[inline]
    pub fn dynamic(&self) -> Option<&AgentDynamic> {
        self.dynamic.as_ref()
    }

    #[inline]
    pub fn collision_detection(&self) -> &CollisionDetection {
        &self.policy
    }

    /// Change the policy.  Edits made while an action holds a lease on a
    /// field are overwritten when that action finalizes.
    #[inline]
    pub fn collision_detection_mut(&mut self) -> &mut CollisionDetection {
        &mut self.policy
    }

    #[inline]
    pub fn pending_queries(&self) -> &PendingQueries {
        &self.queries
    }

    /// The current (or most recent) action.
    #[inline]
    pub fn action(&self) -> Option<&Action> {
        self.action.as_ref()
    }

    #[inline]
    pub fn previous_action(&self) -> Option<&PreviousAction> {
        self.previous.as_ref()
    }

    /// Status of the current action.  An idle agent reports `Success`.
    pub fn status(&self) -> ActionStatus {
        self.action.as_ref().map_or(ActionStatus::Success, Action::status)
    }

    /// `true` while the current action is ongoing.
    pub fn is_active(&self) -> bool {
        self.action.as_ref().is_some_and(|a| a.status().is_ongoing())
    }

    // ── Driving ───────────────────────────────────────────────────────────

    /// Replace the current action.
    ///
    /// The repeat-failure guard is applied against the previous finished
    /// action.  An action that is still running is queued for finalize on
    /// the next tick, ahead of the new action's initialize.
    pub fn assign(&mut self, mut action: Action) {
        let guarded = action.apply_repeat_guard(self.previous.as_ref(), &self.policy);
        if let Some(old) = self.action.take() {
            if !old.is_finalized() {
                debug!(agent = %self.id(), action = %old.tag(), "pre-empted");
                self.preempted.push(old);
            }
        }
        debug!(agent = %self.id(), action = %action.tag(), guarded, "assigned");
        self.action = Some(action);
    }

    /// Advance the current action with this tick's telemetry.
    ///
    /// # Errors
    /// `EngineError::AgentNotFound` if `telemetry` has no frame for this agent.
    pub fn tick(&mut self, telemetry: &TickTelemetry, peers: &PeerIndex) -> EngineResult<CommandBatch> {
        let id = self.agent.id();
        let frame = telemetry.agent(id).ok_or(EngineError::AgentNotFound(id))?;
        let dynamic = self.dynamic.insert(AgentDynamic::from_frame(telemetry.tick, frame));

        let mut ctx = TickContext::new(
            telemetry,
            &self.agent,
            dynamic,
            &mut self.policy,
            &mut self.queries,
            &self.config,
            peers,
        );
        let mut out = CommandBatch::new();

        for mut old in self.preempted.drain(..) {
            trace!(agent = %id, action = %old.tag(), "finalize pre-empted");
            out.append(old.finalize(&mut ctx));
        }

        let Some(action) = self.action.as_mut() else {
            return Ok(out);
        };
        if action.is_finalized() {
            return Ok(out);
        }

        if !action.is_initialized() && action.status().is_ongoing() {
            trace!(agent = %id, action = %action.tag(), tick = %telemetry.tick, "initialize");
            out.append(action.initialize(&mut ctx));
        } else if action.status().is_ongoing() {
            trace!(agent = %id, action = %action.tag(), tick = %telemetry.tick, "ongoing");
            out.append(action.ongoing_step(&mut ctx));
        }

        if action.status().is_terminal() {
            out.append(action.finalize(&mut ctx));
            self.previous = Some(action.snapshot());
            debug!(agent = %id, action = %action.tag(), status = %action.status(), tick = %telemetry.tick, "action ended");
        }
        Ok(out)
    }
}
