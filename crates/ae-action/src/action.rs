//! The `Action` state machine and the tagged union over action kinds.
//!
//! Every action is driven through three calls, in order:
//!
//! 1. `initialize`: once, on the first tick after assignment.
//! 2. `ongoing_step`: every later tick while the status is `Ongoing`.
//! 3. `finalize`: once, when the status turns terminal or the action is
//!    replaced.
//!
//! Calling them out of order is a contract violation and panics.  Kind
//! specific behaviour is an exhaustive `match` over [`ActionKind`]; composite
//! kinds own their children as boxed `Action`s and drive them with the same
//! three calls.

use std::fmt;

use ae_agent::{CollisionDetection, PolicyLease};
use ae_command::CommandBatch;

use crate::{
    ActionStatus, Animate, ArmMotion, DrivePlan, DropObject, Grasp, Motion, MotionTarget, MoveTo,
    Navigate, Target, TickContext, TurnTo,
};

// ── ActionCore ────────────────────────────────────────────────────────────────

/// State every kind shares: the status and the policy lease.
#[derive(Debug, Default, Clone)]
pub struct ActionCore {
    status:           ActionStatus,
    pub(crate) lease: PolicyLease,
}

impl ActionCore {
    #[inline]
    pub fn status(&self) -> ActionStatus {
        self.status
    }

    #[inline]
    pub fn lease(&self) -> &PolicyLease {
        &self.lease
    }

    /// Move to a terminal status.  The first terminal status wins.
    pub(crate) fn end(&mut self, status: ActionStatus) {
        debug_assert!(status.is_terminal(), "end() with {status}");
        if self.status.is_ongoing() {
            self.status = status;
        }
    }
}

// ── Kinds ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub enum ActionKind {
    MoveBy(Motion),
    TurnBy(Motion),
    TurnTo(TurnTo),
    MoveTo(MoveTo),
    Navigate(Navigate),
    Animate(Animate),
    ReachFor(ArmMotion),
    ResetArm(ArmMotion),
    Grasp(Grasp),
    Drop(DropObject),
}

/// Fieldless mirror of [`ActionKind`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ActionTag {
    MoveBy,
    TurnBy,
    TurnTo,
    MoveTo,
    Navigate,
    Animate,
    ReachFor,
    ResetArm,
    Grasp,
    Drop,
}

impl ActionTag {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionTag::MoveBy   => "move_by",
            ActionTag::TurnBy   => "turn_by",
            ActionTag::TurnTo   => "turn_to",
            ActionTag::MoveTo   => "move_to",
            ActionTag::Navigate => "navigate",
            ActionTag::Animate  => "animate",
            ActionTag::ReachFor => "reach_for",
            ActionTag::ResetArm => "reset_arm",
            ActionTag::Grasp    => "grasp",
            ActionTag::Drop     => "drop",
        }
    }

    /// Kinds that drive the arms through IK.
    #[inline]
    pub fn is_arm_motion(self) -> bool {
        matches!(self, ActionTag::ReachFor | ActionTag::ResetArm)
    }
}

impl fmt::Display for ActionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ActionKind {
    pub fn tag(&self) -> ActionTag {
        match self {
            ActionKind::MoveBy(_)   => ActionTag::MoveBy,
            ActionKind::TurnBy(_)   => ActionTag::TurnBy,
            ActionKind::TurnTo(_)   => ActionTag::TurnTo,
            ActionKind::MoveTo(_)   => ActionTag::MoveTo,
            ActionKind::Navigate(_) => ActionTag::Navigate,
            ActionKind::Animate(_)  => ActionTag::Animate,
            ActionKind::ReachFor(_) => ActionTag::ReachFor,
            ActionKind::ResetArm(_) => ActionTag::ResetArm,
            ActionKind::Grasp(_)    => ActionTag::Grasp,
            ActionKind::Drop(_)     => ActionTag::Drop,
        }
    }

    /// Direction of a leaf motion; 0 for every other kind.
    fn sign(&self) -> i8 {
        match self {
            ActionKind::MoveBy(m) | ActionKind::TurnBy(m) => m.target().sign(),
            _ => 0,
        }
    }

    fn animation(&self) -> Option<&str> {
        match self {
            ActionKind::Animate(a) => Some(a.name()),
            _ => None,
        }
    }
}

// ── PreviousAction ────────────────────────────────────────────────────────────

/// Value snapshot of a finished action, kept by the Orchestrator for the
/// repeat-failure guard.  Never a live reference.
#[derive(Clone, Debug, PartialEq)]
pub struct PreviousAction {
    pub tag:       ActionTag,
    pub status:    ActionStatus,
    /// Sign of a leaf motion's target, else 0.
    pub sign:      i8,
    pub animation: Option<String>,
}

// ── Action ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Action {
    core:        ActionCore,
    initialized: bool,
    finalized:   bool,
    kind:        ActionKind,
}

impl Action {
    pub fn new(kind: ActionKind) -> Self {
        Self { core: ActionCore::default(), initialized: false, finalized: false, kind }
    }

    pub fn move_by(distance: f32, arrived_at: f32, plan: &DrivePlan) -> Self {
        Self::new(ActionKind::MoveBy(Motion::new(MotionTarget::Distance(distance), arrived_at, plan)))
    }

    pub fn turn_by(angle: f32, aligned_at: f32, plan: &DrivePlan) -> Self {
        Self::new(ActionKind::TurnBy(Motion::new(MotionTarget::angle(angle), aligned_at, plan)))
    }

    pub fn turn_to(target: impl Into<Target>, aligned_at: f32, plan: DrivePlan) -> Self {
        Self::new(ActionKind::TurnTo(TurnTo::new(target.into(), aligned_at, plan)))
    }

    pub fn move_to(target: impl Into<Target>, arrived_at: f32, aligned_at: f32, plan: DrivePlan) -> Self {
        Self::new(ActionKind::MoveTo(MoveTo::new(target.into(), arrived_at, aligned_at, plan)))
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn status(&self) -> ActionStatus {
        self.core.status
    }

    #[inline]
    pub fn tag(&self) -> ActionTag {
        self.kind.tag()
    }

    #[inline]
    pub fn kind(&self) -> &ActionKind {
        &self.kind
    }

    #[inline]
    pub fn core(&self) -> &ActionCore {
        &self.core
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    #[inline]
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// `true` while a navigation is backing off for a peer.
    pub fn is_yielding(&self) -> bool {
        match &self.kind {
            ActionKind::Navigate(n) => n.is_yielding(),
            _ => false,
        }
    }

    pub fn snapshot(&self) -> PreviousAction {
        PreviousAction {
            tag:       self.tag(),
            status:    self.status(),
            sign:      self.kind.sign(),
            animation: self.kind.animation().map(str::to_owned),
        }
    }

    /// Fail with `Collision` before doing anything if the previous action
    /// was the same motion and ended in a collision.
    ///
    /// Only applies when `policy.previous_was_same` is set.  "Same" means the
    /// same leaf kind in the same direction, the same animation, or any arm
    /// motion after an arm motion.  Returns whether the guard fired.
    pub fn apply_repeat_guard(&mut self, previous: Option<&PreviousAction>, policy: &CollisionDetection) -> bool {
        assert!(!self.initialized, "repeat guard applied to a running {}", self.tag());
        let Some(prev) = previous else {
            return false;
        };
        if !policy.previous_was_same || prev.status != ActionStatus::Collision || self.status().is_terminal() {
            return false;
        }
        let tag = self.tag();
        let same = match &self.kind {
            ActionKind::MoveBy(_) | ActionKind::TurnBy(_) => prev.tag == tag && prev.sign == self.kind.sign(),
            ActionKind::Animate(a) => prev.tag == tag && prev.animation.as_deref() == Some(a.name()),
            ActionKind::ReachFor(_) | ActionKind::ResetArm(_) => prev.tag.is_arm_motion(),
            _ => false,
        };
        if same {
            self.core.end(ActionStatus::Collision);
        }
        same
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// # Panics
    /// If called twice or on an action that is already terminal.
    pub fn initialize(&mut self, ctx: &mut TickContext<'_>) -> CommandBatch {
        assert!(!self.initialized, "{} initialized twice", self.tag());
        assert!(self.status().is_ongoing(), "{} initialized after ending {}", self.tag(), self.status());
        self.initialized = true;
        let core = &mut self.core;
        match &mut self.kind {
            ActionKind::MoveBy(m) | ActionKind::TurnBy(m) => m.initialize(core, ctx),
            ActionKind::TurnTo(a)   => a.initialize(core, ctx),
            ActionKind::MoveTo(a)   => a.initialize(core, ctx),
            ActionKind::Navigate(a) => a.initialize(core, ctx),
            ActionKind::Animate(a)  => a.initialize(core, ctx),
            ActionKind::ReachFor(a) | ActionKind::ResetArm(a) => a.initialize(core, ctx),
            ActionKind::Grasp(a)    => a.initialize(core, ctx),
            ActionKind::Drop(a)     => a.initialize(core, ctx),
        }
    }

    /// # Panics
    /// If the action is uninitialized, terminal, or finalized.
    pub fn ongoing_step(&mut self, ctx: &mut TickContext<'_>) -> CommandBatch {
        assert!(self.initialized, "{} stepped before initialize", self.tag());
        assert!(!self.finalized, "{} stepped after finalize", self.tag());
        assert!(self.status().is_ongoing(), "{} stepped after ending {}", self.tag(), self.status());
        let core = &mut self.core;
        match &mut self.kind {
            ActionKind::MoveBy(m) | ActionKind::TurnBy(m) => m.ongoing(core, ctx),
            ActionKind::TurnTo(a)   => a.ongoing(core, ctx),
            ActionKind::MoveTo(a)   => a.ongoing(core, ctx),
            ActionKind::Navigate(a) => a.ongoing(core, ctx),
            ActionKind::Animate(a)  => a.ongoing(core, ctx),
            ActionKind::ReachFor(a) | ActionKind::ResetArm(a) => a.ongoing(core, ctx),
            ActionKind::Grasp(a)    => a.ongoing(core, ctx),
            ActionKind::Drop(a)     => a.ongoing(core, ctx),
        }
    }

    /// Emit stop commands and release every policy change.  An action that
    /// never initialized only releases its lease.
    ///
    /// # Panics
    /// If called twice.
    pub fn finalize(&mut self, ctx: &mut TickContext<'_>) -> CommandBatch {
        assert!(!self.finalized, "{} finalized twice", self.tag());
        self.finalized = true;
        let core = &self.core;
        let out = if !self.initialized {
            CommandBatch::new()
        } else {
            match &mut self.kind {
                ActionKind::MoveBy(m) | ActionKind::TurnBy(m) => m.finalize(ctx),
                ActionKind::TurnTo(a)   => a.finalize(ctx),
                ActionKind::MoveTo(a)   => a.finalize(ctx),
                ActionKind::Navigate(a) => a.finalize(ctx),
                ActionKind::Animate(a)  => a.finalize(core, ctx),
                ActionKind::ReachFor(a) | ActionKind::ResetArm(a) => a.finalize(core, ctx),
                ActionKind::Grasp(_)    => CommandBatch::new(),
                ActionKind::Drop(_)     => CommandBatch::new(),
            }
        };
        self.core.lease.release(ctx.policy);
        out
    }
}
