//! Backend configuration.

use crate::{KinematicError, KinematicResult};

/// Physics constants of the kinematic backend.
///
/// Wheel speeds are linear in torque: a chair with both motors at torque
/// `t` rolls `wheel_speed * t` metres per tick.  Without motor torque the
/// chair coasts and decays by `1 / (1 + brake / 20)` per tick, or by a
/// rolling factor of 0.9 when no brake is applied.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct KinematicConfig {
    /// Simulated seconds per tick.
    pub frame_dt_secs: f32,
    /// The room spans `[-half_width, half_width]` on X.
    pub room_half_width: f32,
    /// The room spans `[-half_depth, half_depth]` on Z.
    pub room_half_depth: f32,
    /// Metres per tick per unit of mean motor torque.
    pub wheel_speed: f32,
    /// Degrees per tick per unit of half the torque difference.
    pub wheel_turn_rate: f32,
    /// Length of every named animation, ticks.
    pub animation_ticks: u32,
    /// Maximum hand-to-object distance for a grasp to take hold, metres.
    pub grasp_distance: f32,
    /// Fall speed of a dropped object, metres per tick.
    pub drop_speed: f32,
    /// Multiplicative actuation noise amplitude; `0` is noise-free.
    pub noise: f32,
    /// Seed for the per-agent noise RNGs.
    pub seed: u64,
}

impl Default for KinematicConfig {
    fn default() -> Self {
        Self {
            frame_dt_secs:   1.0 / 60.0,
            room_half_width: 10.0,
            room_half_depth: 10.0,
            wheel_speed:     0.005,
            wheel_turn_rate: 0.2,
            animation_ticks: 30,
            grasp_distance:  0.25,
            drop_speed:      0.2,
            noise:           0.0,
            seed:            0,
        }
    }
}

impl KinematicConfig {
    pub fn validate(&self) -> KinematicResult<()> {
        if self.frame_dt_secs <= 0.0 {
            return Err(KinematicError::Config("frame_dt_secs must be positive".into()));
        }
        if self.room_half_width <= 0.0 || self.room_half_depth <= 0.0 {
            return Err(KinematicError::Config("room extents must be positive".into()));
        }
        if self.wheel_speed <= 0.0 || self.wheel_turn_rate <= 0.0 {
            return Err(KinematicError::Config("wheel rates must be positive".into()));
        }
        if !(0.0..1.0).contains(&self.noise) {
            return Err(KinematicError::Config(format!("noise must be in [0, 1), got {}", self.noise)));
        }
        Ok(())
    }
}
