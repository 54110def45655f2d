//! How a motion target becomes actuation commands for each kind of rig.
//!
//! | Rig        | Start                                   | Brake              | Stop        |
//! |------------|-----------------------------------------|--------------------|-------------|
//! | legged     | `Walk` / `Turn`                         | none               | `StopMotion`|
//! | wheelchair | motor torque, release brakes, steer     | once, at `brake_at`| brake       |

use ae_command::Command;
use ae_core::{AgentId, EngineConfig, Locomotion, WalkValues, WheelValues};

use crate::MotionTarget;

/// Actuation chosen before the target is known.
///
/// `Wheels(None)` derives [`WheelValues`] from the target when the motion is
/// built; `Wheels(Some(_))` pins caller-supplied values.
#[derive(Clone, Debug, PartialEq)]
pub enum DrivePlan {
    Walk(WalkValues),
    Wheels(Option<WheelValues>),
}

impl DrivePlan {
    pub fn for_agent(locomotion: Locomotion, config: &EngineConfig) -> Self {
        match locomotion {
            Locomotion::Legged     => DrivePlan::Walk(config.walk.clone()),
            Locomotion::Wheelchair => DrivePlan::Wheels(None),
        }
    }

    pub fn resolve(&self, target: MotionTarget) -> Drive {
        match self {
            DrivePlan::Walk(walk)          => Drive::Walk(walk.clone()),
            DrivePlan::Wheels(Some(wheel)) => Drive::Wheels(*wheel),
            DrivePlan::Wheels(None) => Drive::Wheels(match target {
                MotionTarget::Distance(d) => WheelValues::for_move(d),
                MotionTarget::Angle(a)    => WheelValues::for_turn(a),
            }),
        }
    }
}

/// Concrete actuation for one motion.
#[derive(Clone, Debug, PartialEq)]
pub enum Drive {
    Walk(WalkValues),
    Wheels(WheelValues),
}

impl Drive {
    pub fn start(&self, agent: AgentId, target: MotionTarget) -> Vec<Command> {
        match (self, target) {
            (Drive::Walk(walk), MotionTarget::Distance(d)) => vec![Command::Walk {
                agent,
                animation:       walk.animation.clone(),
                forward:         d >= 0.0,
                meters_per_tick: walk.meters_per_tick,
            }],
            (Drive::Walk(walk), MotionTarget::Angle(a)) => vec![Command::Turn {
                agent,
                degrees_per_tick: walk.degrees_per_tick.copysign(a),
            }],
            (Drive::Wheels(w), _) => vec![
                Command::SetMotorTorque { agent, left: w.left_motor_torque, right: w.right_motor_torque },
                Command::SetBrakeTorque { agent, left: 0.0, right: 0.0 },
                Command::SetSteerAngle  { agent, angle: w.steer_angle },
            ],
        }
    }

    /// Zero the motors and apply the brake torque.  Legged rigs have no
    /// brake phase.
    pub fn brake(&self, agent: AgentId) -> Vec<Command> {
        match self {
            Drive::Walk(_) => Vec::new(),
            Drive::Wheels(w) => vec![
                Command::SetMotorTorque { agent, left: 0.0, right: 0.0 },
                Command::SetBrakeTorque { agent, left: w.brake_torque, right: w.brake_torque },
                Command::SetSteerAngle  { agent, angle: 0.0 },
            ],
        }
    }

    pub fn stop(&self, agent: AgentId) -> Vec<Command> {
        match self {
            Drive::Walk(_)   => vec![Command::StopMotion { agent }],
            Drive::Wheels(_) => self.brake(agent),
        }
    }

    /// Remaining distance or angle at which braking starts.
    pub fn brake_at(&self) -> Option<f32> {
        match self {
            Drive::Walk(_)   => None,
            Drive::Wheels(w) => Some(w.brake_at),
        }
    }
}
