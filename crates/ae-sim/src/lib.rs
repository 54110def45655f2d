//! `ae-sim` — multi-agent tick loop for the `ae` action engine.
//!
//! # One round trip per tick
//!
//! ```text
//! prime:  telemetry₀ = backend.step([])
//! for each tick n:
//!   ① Peers   — build a PeerIndex from telemetryₙ (read-only snapshot).
//!   ② Advance — for each Orchestrator in ascending AgentId order:
//!                 commands += orchestrator.tick(telemetryₙ, peers)
//!   ③ Step    — telemetryₙ₊₁ = backend.step(commands)
//! ```
//!
//! Agents never see each other's state except through the telemetry
//! snapshot, so the order in ② only fixes the order of commands inside the
//! batch.
//!
//! | Module       | Contents                                        |
//! |--------------|-------------------------------------------------|
//! | [`backend`]  | `Backend` trait                                 |
//! | [`session`]  | `Session`: the tick loop                        |
//! | [`builder`]  | `SessionBuilder`                                |
//! | [`observer`] | `SessionObserver`, `NoopObserver`               |
//! | [`error`]    | `SessionError`, `BackendError`                  |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ae_sim::{NoopObserver, SessionBuilder};
//!
//! let mut session = SessionBuilder::new(EngineConfig::default(), backend)
//!     .agent(chair)
//!     .agent(walker)
//!     .build()?;
//! session.orchestrator_mut(AgentId(3)).unwrap().navigate_to(goal);
//! session.run_until_idle(2_000, &mut NoopObserver)?;
//! ```

pub mod backend;
pub mod builder;
pub mod error;
pub mod observer;
pub mod session;


pub use backend::Backend;
pub use builder::SessionBuilder;
pub use error::{BackendError, BackendResult, SessionError, SessionResult};
pub use observer::{NoopObserver, SessionObserver};
pub use session::Session;
