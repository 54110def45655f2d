//! Per-agent kinematic state.

use ae_command::{CollisionEvent, Contact, ContactPhase, Hands, HeldObjects, Pose};
use ae_core::{AgentId, AgentRng, Arm, BodyPartId, Locomotion, Vec3, wrap_degrees};

use crate::KinematicConfig;

/// Decay divisor for brake torque: velocity × `1 / (1 + brake / BRAKE_SCALE)`.
const BRAKE_SCALE: f32 = 20.0;
/// Per-tick velocity factor of an unbraked, unpowered chair.
const ROLLING_DECAY: f32 = 0.9;
/// Velocities below this snap to zero.
const REST_VELOCITY: f32 = 1e-4;

// ── Gait ──────────────────────────────────────────────────────────────────────

/// What a legged body (or any body's animation layer) is doing.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Gait {
    Idle,
    /// Signed metres per tick along the forward vector.
    Walk(f32),
    /// Degrees per tick, positive clockwise.
    Turn(f32),
    /// A scripted animation with this many ticks left.
    Animation(u32),
}

// ── Wheels ────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) struct Wheels {
    pub motor:   [f32; 2],
    pub brake:   [f32; 2],
    pub steer:   f32,
    /// Metres per tick.
    pub linear:  f32,
    /// Degrees per tick.
    pub angular: f32,
}

impl Wheels {
    /// Update velocities from the current torques.
    fn update(&mut self, config: &KinematicConfig) {
        let [left, right] = self.motor;
        if left != 0.0 || right != 0.0 {
            self.linear = config.wheel_speed * (left + right) * 0.5;
            self.angular = config.wheel_turn_rate * (left - right) * 0.5;
            return;
        }
        let brake = (self.brake[0] + self.brake[1]) * 0.5;
        let decay = if brake > 0.0 { 1.0 / (1.0 + brake / BRAKE_SCALE) } else { ROLLING_DECAY };
        self.linear *= decay;
        self.angular *= decay;
        if self.linear.abs() < REST_VELOCITY {
            self.linear = 0.0;
        }
        if self.angular.abs() < REST_VELOCITY {
            self.angular = 0.0;
        }
    }
}

// ── Arms ──────────────────────────────────────────────────────────────────────

/// Hand offsets in the agent frame: x right, y up, z forward.
fn rest_offset(arm: Arm) -> Vec3 {
    match arm {
        Arm::Left  => Vec3::new(-0.2, 0.9, 0.1),
        Arm::Right => Vec3::new(0.2, 0.9, 0.1),
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct ArmMove {
    from:       Vec3,
    to:         Vec3,
    ticks_left: u32,
    total:      u32,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct ArmState {
    /// Current hand offset in the agent frame.
    pub offset: Vec3,
    pub moving: Option<ArmMove>,
}

impl ArmState {
    fn at_rest(arm: Arm) -> Self {
        Self { offset: rest_offset(arm), moving: None }
    }

    fn start(&mut self, to: Vec3, ticks: u32) {
        let ticks = ticks.max(1);
        self.moving = Some(ArmMove { from: self.offset, to, ticks_left: ticks, total: ticks });
    }

    fn advance(&mut self) {
        let Some(mut m) = self.moving else {
            return;
        };
        m.ticks_left -= 1;
        let t = 1.0 - m.ticks_left as f32 / m.total as f32;
        self.offset = m.from + (m.to - m.from) * t;
        self.moving = (m.ticks_left > 0).then_some(m);
    }
}

// ── Body ──────────────────────────────────────────────────────────────────────

/// One agent as the backend sees it: a vertical disc with two hands.
pub(crate) struct Body {
    pub id:         AgentId,
    pub part:       BodyPartId,
    pub locomotion: Locomotion,
    pub radius:     f32,
    pub position:   Vec3,
    pub yaw:        f32,
    pub gait:       Gait,
    pub wheels:     Wheels,
    pub arms:       [ArmState; 2],
    pub held:       HeldObjects,
    /// What the body touched at the end of the previous tick.
    pub contacts:   Vec<Contact>,
    /// Events produced by the latest tick.
    pub events:     Vec<CollisionEvent>,
    pub rng:        AgentRng,
}

impl Body {
    pub fn new(
        id:         AgentId,
        part:       BodyPartId,
        locomotion: Locomotion,
        radius:     f32,
        pose:       Pose,
        seed:       u64,
    ) -> Self {
        Self {
            id,
            part,
            locomotion,
            radius,
            position: pose.position,
            yaw:      pose.yaw_degrees(),
            gait:     Gait::Idle,
            wheels:   Wheels::default(),
            arms:     [ArmState::at_rest(Arm::Left), ArmState::at_rest(Arm::Right)],
            held:     HeldObjects::default(),
            contacts: Vec::new(),
            events:   Vec::new(),
            rng:      AgentRng::new(seed, id),
        }
    }

    #[inline]
    pub fn pose(&self) -> Pose {
        Pose::new(self.position, self.yaw)
    }

    #[inline]
    pub fn forward(&self) -> Vec3 {
        Vec3::from_yaw(self.yaw)
    }

    #[inline]
    fn right(&self) -> Vec3 {
        Vec3::from_yaw(self.yaw + 90.0)
    }

    // ── Locomotion ────────────────────────────────────────────────────────

    /// This tick's `(forward displacement, yaw change)` after noise.
    pub fn drive(&mut self, config: &KinematicConfig) -> (f32, f32) {
        let (step, turn) = match self.locomotion {
            Locomotion::Wheelchair => {
                self.wheels.update(config);
                (self.wheels.linear, self.wheels.angular)
            }
            Locomotion::Legged => match self.gait {
                Gait::Walk(speed) => (speed, 0.0),
                Gait::Turn(rate)  => (0.0, rate),
                Gait::Idle | Gait::Animation(_) => (0.0, 0.0),
            },
        };
        let step = if step != 0.0 { step * self.rng.jitter(config.noise) } else { 0.0 };
        let turn = if turn != 0.0 { turn * self.rng.jitter(config.noise) } else { 0.0 };
        (step, turn)
    }

    pub fn turn(&mut self, degrees: f32) {
        self.yaw = wrap_degrees(self.yaw + degrees);
    }

    /// Blocked by something: motion stops, torques stay applied.
    pub fn halt(&mut self) {
        self.wheels.linear = 0.0;
    }

    /// Count down the animation and arm motions.
    pub fn advance_scripts(&mut self) {
        if let Gait::Animation(left) = self.gait {
            self.gait = if left <= 1 { Gait::Idle } else { Gait::Animation(left - 1) };
        }
        for arm in &mut self.arms {
            arm.advance();
        }
    }

    /// `false` while an animation or an arm motion is playing.
    pub fn motion_done(&self) -> bool {
        !matches!(self.gait, Gait::Animation(_)) && self.arms.iter().all(|a| a.moving.is_none())
    }

    // ── Arms ──────────────────────────────────────────────────────────────

    fn arm_mut(&mut self, arm: Arm) -> &mut ArmState {
        match arm {
            Arm::Left  => &mut self.arms[0],
            Arm::Right => &mut self.arms[1],
        }
    }

    pub fn hand(&self, arm: Arm) -> Vec3 {
        let offset = match arm {
            Arm::Left  => self.arms[0].offset,
            Arm::Right => self.arms[1].offset,
        };
        self.position + self.right() * offset.x + Vec3::UP * offset.y + self.forward() * offset.z
    }

    pub fn hands(&self) -> Hands {
        Hands { left: self.hand(Arm::Left), right: self.hand(Arm::Right) }
    }

    /// Move `arm`'s hand to `target` over `ticks`, never further than
    /// `max_distance` from the body.
    pub fn reach(&mut self, arm: Arm, target: Vec3, max_distance: f32, ticks: u32) {
        let mut d = target - self.position;
        if d.length() > max_distance {
            d = d.normalized() * max_distance;
        }
        let local = Vec3::new(d.dot(self.right()), d.y, d.dot(self.forward()));
        self.arm_mut(arm).start(local, ticks);
    }

    pub fn reset_arm(&mut self, arm: Arm, ticks: u32) {
        self.arm_mut(arm).start(rest_offset(arm), ticks);
    }

    pub fn stop_arm(&mut self, arm: Arm) {
        self.arm_mut(arm).moving = None;
    }

    // ── Contacts ──────────────────────────────────────────────────────────

    /// Diff `touching` against the previous tick's contacts into
    /// enter / stay / exit events.
    pub fn update_contacts(&mut self, touching: Vec<Contact>) {
        let part = self.part;
        let event = |contact, phase| CollisionEvent { body_part: part, contact, phase };
        self.events.clear();
        for &c in &touching {
            let phase = if self.contacts.contains(&c) { ContactPhase::Stay } else { ContactPhase::Enter };
            self.events.push(event(c, phase));
        }
        for &c in &self.contacts {
            if !touching.contains(&c) {
                self.events.push(event(c, ContactPhase::Exit));
            }
        }
        self.contacts = touching;
    }
}
