//! Convenience constructors: build an action from the Orchestrator's config
//! and locomotion, and assign it.

use ae_action::{Action, ActionKind, Animate, ArmMotion, DropObject, Grasp, Navigate, Target};
use ae_core::{Arm, ObjectId, Vec3};

use crate::Orchestrator;

impl Orchestrator {
    /// Move forward (or backward, if negative) by `distance` metres.
    pub fn move_by(&mut self, distance: f32) {
        let action = Action::move_by(distance, self.config().arrived_at, self.plan());
        self.assign(action);
    }

    /// Turn by `angle` degrees; positive is clockwise.
    pub fn turn_by(&mut self, angle: f32) {
        let action = Action::turn_by(angle, self.config().aligned_at, self.plan());
        self.assign(action);
    }

    pub fn turn_to(&mut self, target: impl Into<Target>) {
        let action = Action::turn_to(target, self.config().aligned_at, self.plan().clone());
        self.assign(action);
    }

    pub fn move_to(&mut self, target: impl Into<Target>) {
        let config = self.config();
        let action = Action::move_to(target, config.arrived_at, config.aligned_at, self.plan().clone());
        self.assign(action);
    }

    /// Follow a path to `destination`, yielding to higher-id peers.
    pub fn navigate_to(&mut self, destination: Vec3) {
        let navigate = Navigate::new(destination, self.plan().clone(), self.config());
        self.assign(Action::new(ActionKind::Navigate(navigate)));
    }

    pub fn animate(&mut self, name: impl Into<String>) {
        self.assign(Action::new(ActionKind::Animate(Animate::new(name))));
    }

    pub fn reach_for(&mut self, target: impl Into<Target>, arms: impl IntoIterator<Item = Arm>) {
        let config = self.config();
        let reach = ArmMotion::reach(
            target.into(),
            arms,
            config.reach_max_distance,
            config.reach_arrived_at,
            config.arm_duration_secs,
        );
        self.assign(Action::new(ActionKind::ReachFor(reach)));
    }

    pub fn reset_arm(&mut self, arms: impl IntoIterator<Item = Arm>) {
        let reset = ArmMotion::reset(arms, self.config().arm_duration_secs);
        self.assign(Action::new(ActionKind::ResetArm(reset)));
    }

    pub fn grasp(&mut self, object: ObjectId, arm: Arm) {
        self.assign(Action::new(ActionKind::Grasp(Grasp::new(object, arm))));
    }

    pub fn drop_held(&mut self, arm: Arm) {
        let drop = DropObject::new(arm, self.config().drop_max_ticks);
        self.assign(Action::new(ActionKind::Drop(drop)));
    }
}
