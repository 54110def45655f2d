//! `ae-action` — resumable action state machines for one agent.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                          |
//! |---------------|-------------------------------------------------------------------|
//! | [`status`]    | `ActionStatus`                                                    |
//! | [`context`]   | `TickContext<'a>` — what an action may read and touch this tick   |
//! | [`action`]    | `Action`, `ActionKind` tagged union, `ActionTag`, `PreviousAction`|
//! | [`drive`]     | `DrivePlan`, `Drive` — walk vs wheel actuation                    |
//! | [`motion`]    | `Motion` — `MoveBy` / `TurnBy` leaf, overlap obstacle detection   |
//! | [`turn_to`]   | `TurnTo`, `Target`                                                |
//! | [`move_to`]   | `MoveTo` composite (turn, then move)                              |
//! | [`navigate`]  | `Navigate` composite (path, waypoints, yielding)                  |
//! | [`yielding`]  | `YieldRule` — lower id yields                                     |
//! | [`peers`]     | `PeerIndex` — per-tick R-tree of agent positions                  |
//! | [`animate`]   | `Animate`                                                         |
//! | [`arm`]       | `ArmMotion` (reach for, reset)                                    |
//! | [`grasp`]     | `Grasp`, `DropObject`                                             |
//!
//! # Design notes
//!
//! Actions never talk to the backend: every call returns a `CommandBatch`.
//! Nothing in an action outlives the tick except its own progress state; the
//! agent's dynamic snapshot and the collision policy are lent through
//! [`TickContext`] for one call at a time.
//!
//! Motion and planning failures are [`ActionStatus`] values.  Lifecycle
//! misuse (initializing twice, stepping a finished action, finalizing twice)
//! panics.

pub mod action;
pub mod animate;
pub mod arm;
pub mod context;
pub mod drive;
pub mod grasp;
pub mod motion;
pub mod move_to;
pub mod navigate;
pub mod peers;
pub mod status;
pub mod turn_to;
pub mod yielding;


pub use action::{Action, ActionCore, ActionKind, ActionTag, PreviousAction};
pub use animate::Animate;
pub use arm::{ArmGoal, ArmMotion};
pub use context::TickContext;
pub use drive::{Drive, DrivePlan};
pub use grasp::{DropObject, Grasp};
pub use motion::{Motion, MotionTarget};
pub use move_to::{MoveTo, MoveToPhase};
pub use navigate::{Navigate, NavigateState};
pub use peers::PeerIndex;
pub use status::ActionStatus;
pub use turn_to::{Target, TurnTo};
pub use yielding::YieldRule;
