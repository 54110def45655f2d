//! Engine configuration.
//!
//! One `EngineConfig` is passed into every Orchestrator at construction.
//! There are no process-wide registries: two sessions in the same process
//! can run with different tolerances.  With the `serde` feature every field
//! is optional in a config file and falls back to [`Default`].

use crate::{EngineError, EngineResult, Vec3, WalkValues};

/// Tolerances, query shapes, and protocol constants for the action engine.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Distance tolerance for moves, metres.
    pub arrived_at: f32,
    /// Angle tolerance for turns, degrees.
    pub aligned_at: f32,

    // ── Obstacle pre-detection ────────────────────────────────────────────
    /// Offset of the overlap box ahead of the agent, metres.
    pub overlap_distance: f32,
    /// Half extents of the overlap box.
    pub overlap_half_extents: Vec3,

    // ── Motion ────────────────────────────────────────────────────────────
    /// Actuation used by legged agents.
    pub walk: WalkValues,
    /// Consecutive motionless ticks before a motion reports `failed_to_move`.
    pub stall_ticks: u32,
    /// Per-tick displacement (metres or degrees) below which a tick counts
    /// as motionless.
    pub stall_epsilon: f32,

    // ── Navigation ────────────────────────────────────────────────────────
    /// Ticks to wait for a path reply before `failed_to_pathfind`.
    pub path_timeout_ticks: u64,
    /// Peers closer than this trigger the yield protocol, metres.
    pub yield_distance: f32,
    /// Length of the backward move while yielding, metres.
    pub yield_backoff: f32,

    // ── Arms ──────────────────────────────────────────────────────────────
    pub reach_max_distance: f32,
    pub reach_arrived_at: f32,
    /// Nominal reach / reset duration in seconds at `reference_framerate`.
    pub arm_duration_secs: f32,
    pub reference_framerate: f32,
    pub drop_max_ticks: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            arrived_at:           0.1,
            aligned_at:           1.0,
            overlap_distance:     0.5,
            overlap_half_extents: Vec3::new(0.31875, 0.8814, 0.0875),
            walk:                 WalkValues::default(),
            stall_ticks:          20,
            stall_epsilon:        1e-4,
            path_timeout_ticks:   30,
            yield_distance:       1.5,
            yield_backoff:        0.5,
            reach_max_distance:   1.5,
            reach_arrived_at:     0.09,
            arm_duration_secs:    0.25,
            reference_framerate:  60.0,
            drop_max_ticks:       100,
        }
    }
}

impl EngineConfig {
    /// Reject values that would make actions never terminate or never move.
    pub fn validate(&self) -> EngineResult<()> {
        if self.arrived_at < 0.0 || self.aligned_at < 0.0 || self.reach_arrived_at < 0.0 {
            return Err(EngineError::Config("tolerances must be non-negative".into()));
        }
        let e = self.overlap_half_extents;
        if e.x <= 0.0 || e.y <= 0.0 || e.z <= 0.0 {
            return Err(EngineError::Config(format!("overlap half extents must be positive, got {e}")));
        }
        if self.yield_distance <= 0.0 {
            return Err(EngineError::Config("yield_distance must be positive".into()));
        }
        if self.yield_backoff <= 0.0 {
            return Err(EngineError::Config("yield_backoff must be positive".into()));
        }
        if self.path_timeout_ticks == 0 {
            return Err(EngineError::Config("path_timeout_ticks must be at least 1".into()));
        }
        if self.walk.meters_per_tick <= 0.0 || self.walk.degrees_per_tick <= 0.0 {
            return Err(EngineError::Config("walk speeds must be positive".into()));
        }
        if self.stall_ticks == 0 {
            return Err(EngineError::Config("stall_ticks must be at least 1".into()));
        }
        if self.reference_framerate <= 0.0 {
            return Err(EngineError::Config("reference_framerate must be positive".into()));
        }
        Ok(())
    }

    /// Scale a nominal arm duration to the backend's framerate so motions
    /// stay smooth when the simulation runs faster than real time.
    pub fn scaled_duration(&self, duration_secs: f32, frame_dt_secs: f32) -> f32 {
        if frame_dt_secs <= 0.0 {
            return duration_secs;
        }
        let framerate = 1.0 / frame_dt_secs;
        duration_secs * (framerate / self.reference_framerate)
    }
}
