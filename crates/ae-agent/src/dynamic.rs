//! Per-tick agent snapshot.

use std::collections::BTreeSet;

use ae_command::{AgentFrame, CollisionEvent, ContactPhase, Hands, HeldObjects, Pose};
use ae_core::{Arm, BodyPartId, ObjectId, Tick, Vec3};

use crate::CollisionDetection;

/// The agent's state as of one tick's telemetry.
///
/// Replaced wholesale every tick by the Orchestrator that owns it.  Actions
/// only ever see `&AgentDynamic` for the duration of one lifecycle call, and
/// there is no way to mutate one after construction.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentDynamic {
    tick:        Tick,
    pose:        Pose,
    collisions:  Vec<CollisionEvent>,
    held:        HeldObjects,
    hands:       Hands,
    motion_done: bool,
}

impl AgentDynamic {
    /// Snapshot one agent's telemetry record.
    pub fn from_frame(tick: Tick, frame: &AgentFrame) -> Self {
        Self {
            tick,
            pose:        frame.pose,
            collisions:  frame.collisions.clone(),
            held:        frame.held,
            hands:       frame.hands,
            motion_done: frame.motion_done,
        }
    }

    #[inline]
    pub fn tick(&self) -> Tick {
        self.tick
    }

    #[inline]
    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.pose.position
    }

    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.pose.forward
    }

    #[inline]
    pub fn yaw_degrees(&self) -> f32 {
        self.pose.yaw_degrees()
    }

    pub fn collisions(&self) -> &[CollisionEvent] {
        &self.collisions
    }

    #[inline]
    pub fn held(&self) -> &HeldObjects {
        &self.held
    }

    pub fn held_object(&self, arm: Arm) -> Option<ObjectId> {
        self.held.get(arm)
    }

    #[inline]
    pub fn hand_position(&self, arm: Arm) -> Vec3 {
        self.hands.get(arm)
    }

    /// `false` while a scripted animation or arm motion is still playing.
    #[inline]
    pub fn motion_done(&self) -> bool {
        self.motion_done
    }

    /// Body parts that started a collision this tick that `policy` cares
    /// about.
    ///
    /// A part that both entered and exited a counted contact within the same
    /// tick is dropped: it grazed something and is already free.
    pub fn collision_enters(&self, policy: &CollisionDetection) -> Vec<BodyPartId> {
        let mut enters = BTreeSet::new();
        let mut exits = BTreeSet::new();
        for event in &self.collisions {
            if !policy.counts(event.contact) {
                continue;
            }
            match event.phase {
                ContactPhase::Enter => {
                    enters.insert(event.body_part);
                }
                ContactPhase::Exit => {
                    exits.insert(event.body_part);
                }
                ContactPhase::Stay => {}
            }
        }
        enters.difference(&exits).copied().collect()
    }
}
