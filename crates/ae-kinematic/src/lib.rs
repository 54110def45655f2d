//! `ae-kinematic` — deterministic reference backend for the `ae` action
//! engine.
//!
//! Not a physics engine: bodies are discs, the world is one walled room,
//! and motion is integrated with fixed per-tick velocities.  It exists so
//! that sessions, demos, and tests can exercise the full command/telemetry
//! protocol without an external simulator.
//!
//! | Module      | Contents                                              |
//! |-------------|-------------------------------------------------------|
//! | [`config`]  | `KinematicConfig`                                     |
//! | [`scene`]   | `Room`, `SceneObject`, `Scene` (rstar), `OverlapBox`  |
//! | [`planner`] | `Planner` trait, `StraightLinePlanner`, `GridPlanner` |
//! | [`backend`] | `KinematicBackend`, `KinematicBackendBuilder`         |
//! | [`error`]   | `KinematicError`, `KinematicResult`                   |
//!
//! # Command semantics
//!
//! | Command                          | Effect                                          |
//! |----------------------------------|-------------------------------------------------|
//! | `Walk` / `Turn` / `StopMotion`   | legged gait at the commanded rate               |
//! | `PlayAnimation`                  | `motion_done = false` for `animation_ticks`     |
//! | `SetMotorTorque` / `SetBrakeTorque` | wheel velocities (see [`KinematicConfig`])   |
//! | `ReachFor` / `ResetArm` / `StopArm` | linear hand motion over the scaled duration  |
//! | `Grasp` / `Drop`                 | attach a prop within `grasp_distance` / let it fall |
//! | `RequestOverlap` / `RequestPath` | answered in the telemetry of the same step      |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to config and scene types.  |

pub mod backend;
mod body;
pub mod config;
pub mod error;
pub mod planner;
pub mod scene;

#[cfg(test)]
mod tests;

pub use backend::{KinematicBackend, KinematicBackendBuilder};
pub use config::KinematicConfig;
pub use error::{KinematicError, KinematicResult};
pub use planner::{GridPlanner, Planner, Route, StraightLinePlanner};
pub use scene::{OverlapBox, Room, Scene, SceneObject};
