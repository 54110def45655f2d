//! `ae-core` — foundational types for the `ae` action engine.
//!
//! Every other `ae-*` crate depends on this one.  It has no `ae-*`
//! dependencies and minimal external ones (`rand`, `thiserror`, optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                               |
//! |---------------|--------------------------------------------------------|
//! | [`ids`]       | `AgentId`, `ObjectId`, `BodyPartId`, `QueryId`         |
//! | [`geo`]       | `Vec3`, `Quat`, angle helpers                          |
//! | [`time`]      | `Tick`, `FrameClock`                                   |
//! | [`body`]      | `Locomotion`, `Arm`                                    |
//! | [`actuation`] | `WalkValues`, `WheelValues`                            |
//! | [`config`]    | `EngineConfig`                                         |
//! | [`rng`]       | `AgentRng`                                             |
//! | [`error`]     | `EngineError`, `EngineResult`                          |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod actuation;
pub mod body;
pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use actuation::{WalkValues, WheelValues};
pub use body::{Arm, Locomotion};
pub use config::EngineConfig;
pub use error::{EngineError, EngineResult};
pub use geo::{Quat, Vec3, signed_angle, wrap_degrees};
pub use ids::{AgentId, BodyPartId, ObjectId, QueryId};
pub use rng::AgentRng;
pub use time::{FrameClock, Tick};
