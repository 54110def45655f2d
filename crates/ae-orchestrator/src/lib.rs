//! `ae-orchestrator` — the per-agent driver.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                    |
//! |------------------|-------------------------------------------------------------|
//! | [`orchestrator`] | `Orchestrator` — assign / tick / status / is_active         |
//! | [`factory`]      | `move_by`, `turn_to`, `navigate_to`, … built from config    |
//!
//! # Tick contract
//!
//! The caller owns the round trip to the backend:
//!
//! ```text
//! telemetry(n) ──▶ Orchestrator::tick ──▶ CommandBatch ──▶ backend ──▶ telemetry(n+1)
//! ```
//!
//! Query replies and peer positions are therefore always one tick old.  At
//! most one action is active per agent; a replaced action is always
//! finalized before the replacement initializes.

pub mod factory;
pub mod orchestrator;


pub use orchestrator::Orchestrator;
