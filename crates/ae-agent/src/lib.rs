//! `ae-agent` — what an agent *is* and the rules for what may stop it.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                     |
//! |-----------------|--------------------------------------------------------------|
//! | [`static_data`] | `AgentStatic` — created once at spawn, never mutated         |
//! | [`builder`]     | `AgentStaticBuilder` (fluent construction)                   |
//! | [`dynamic`]     | `AgentDynamic` — replaced wholesale every tick               |
//! | [`collision`]   | `CollisionDetection` policy and the collision-enter filter   |
//! | [`lease`]       | `PolicyLease` — restores policy mutations on release         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                    |
//! |---------|-----------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `CollisionDetection` |
//! |         | and `AgentStatic`.                                        |

pub mod builder;
pub mod collision;
pub mod dynamic;
pub mod lease;
pub mod static_data;

#[cfg(test)]
mod tests;

pub use builder::AgentStaticBuilder;
pub use collision::CollisionDetection;
pub use dynamic::AgentDynamic;
pub use lease::PolicyLease;
pub use static_data::AgentStatic;
