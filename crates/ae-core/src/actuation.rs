//! Physical actuation parameters applied when a motion begins.
//!
//! | Type          | Rig          | Contents                                       |
//! |---------------|--------------|------------------------------------------------|
//! | `WalkValues`  | legged       | root-motion animation, speed, turn rate        |
//! | `WheelValues` | wheelchair   | motor torques, brake torque, steer, brake_at   |
//!
//! Both are small immutable values: an action copies them at construction
//! and never mutates them.

/// Actuation for a legged agent.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WalkValues {
    /// Looping root-motion animation played while walking.
    pub animation: String,
    /// Distance covered by one tick of the walk cycle, metres.
    pub meters_per_tick: f32,
    /// In-place turn rate, degrees per tick.
    pub degrees_per_tick: f32,
}

impl Default for WalkValues {
    fn default() -> Self {
        Self {
            animation:        "walking_2".to_owned(),
            meters_per_tick:  0.04911,
            degrees_per_tick: 3.0,
        }
    }
}

/// Actuation for a wheelchair agent.
///
/// `brake_at` is a *remaining* distance (metres) or angle (degrees): once
/// the remaining motion drops below it the action zeroes the motors and
/// applies `brake_torque`, exactly once.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WheelValues {
    pub brake_at:           f32,
    pub brake_torque:       f32,
    pub left_motor_torque:  f32,
    pub right_motor_torque: f32,
    pub steer_angle:        f32,
}

const MOVE_BRAKE_CAP: f32 = 0.15;
const TURN_BRAKE_CAP: f32 = 2.0;

impl WheelValues {
    /// Derive values for a straight move of `distance` metres (negative
    /// distances drive backwards).
    pub fn for_move(distance: f32) -> WheelValues {
        let magnitude = distance.abs();
        let (torque, brake_torque) = if magnitude < 1.0 { (5.0, 5.0) } else { (10.0, 10.0) };
        let torque = if distance < 0.0 { -torque } else { torque };
        WheelValues {
            brake_at:           (magnitude * 0.1).min(MOVE_BRAKE_CAP),
            brake_torque,
            left_motor_torque:  torque,
            right_motor_torque: torque,
            steer_angle:        0.0,
        }
    }

    /// Derive values for an in-place turn of `angle` degrees (positive is
    /// clockwise).  Wheels counter-rotate; small turns use gentler torques.
    pub fn for_turn(angle: f32) -> WheelValues {
        let magnitude = angle.abs();
        let (drive, brake_torque) = if magnitude < 5.0 { (5.0, 5.0) } else { (15.0, 20.0) };
        let (left, right) = if angle > 0.0 { (drive, -drive) } else { (-drive, drive) };
        WheelValues {
            brake_at:           (magnitude * 0.1).min(TURN_BRAKE_CAP),
            brake_torque,
            left_motor_torque:  left,
            right_motor_torque: right,
            steer_angle:        angle,
        }
    }
}
