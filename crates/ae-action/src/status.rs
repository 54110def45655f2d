//! Action outcomes.

use std::fmt;

/// What an action reports after each lifecycle call.
///
/// `Ongoing` is the only non-terminal value.  Every action starts `Ongoing`
/// (unless a guard fails it at assignment) and moves to exactly one terminal
/// value, which is never overwritten.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum ActionStatus {
    #[default]
    Ongoing,
    Success,
    /// The body stopped moving before reaching its target.
    FailedToMove,
    /// A counted collision started.
    Collision,
    /// The overlap cast ahead of the agent hit something.
    DetectedObstacle,
    /// No complete path, or the path reply never came.
    FailedToPathfind,

    // ── Arm / hand families ───────────────────────────────────────────────
    /// The target is beyond the arm's reach before moving.
    CannotReach,
    /// The arm finished but the hand is not at the target.
    FailedToReach,
    /// Grasp requested with an arm that already holds something.
    AlreadyHolding,
    /// The grasp command did not result in the object being held.
    FailedToGrasp,
    /// Drop requested with an empty arm.
    NotHolding,
    /// The dropped object kept moving for too long.
    StillDropping,
}

impl ActionStatus {
    #[inline]
    pub fn is_ongoing(self) -> bool {
        self == ActionStatus::Ongoing
    }

    #[inline]
    pub fn is_terminal(self) -> bool {
        !self.is_ongoing()
    }

    /// Terminal and not `Success`.
    #[inline]
    pub fn is_failure(self) -> bool {
        !matches!(self, ActionStatus::Ongoing | ActionStatus::Success)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActionStatus::Ongoing          => "ongoing",
            ActionStatus::Success          => "success",
            ActionStatus::FailedToMove     => "failed_to_move",
            ActionStatus::Collision        => "collision",
            ActionStatus::DetectedObstacle => "detected_obstacle",
            ActionStatus::FailedToPathfind => "failed_to_pathfind",
            ActionStatus::CannotReach      => "cannot_reach",
            ActionStatus::FailedToReach    => "failed_to_reach",
            ActionStatus::AlreadyHolding   => "already_holding",
            ActionStatus::FailedToGrasp    => "failed_to_grasp",
            ActionStatus::NotHolding       => "not_holding",
            ActionStatus::StillDropping    => "still_dropping",
        }
    }
}

impl fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
