//! Unit tests for ae-agent.

use ae_command::{AgentFrame, CollisionEvent, Contact, ContactPhase, OverlapResult, Pose};
use ae_core::{AgentId, Arm, BodyPartId, Locomotion, ObjectId, Tick, Vec3};

use crate::*;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn event(part: u32, contact: Contact, phase: ContactPhase) -> CollisionEvent {
    CollisionEvent { body_part: BodyPartId(part), contact, phase }
}

fn dynamic_with(events: Vec<CollisionEvent>) -> AgentDynamic {
    let mut frame = AgentFrame::new(AgentId(1), Pose::new(Vec3::ZERO, 0.0));
    frame.collisions = events;
    AgentDynamic::from_frame(Tick(1), &frame)
}

const WALL: Contact = Contact::Environment { floor: false };
const FLOOR: Contact = Contact::Environment { floor: true };

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn hand_is_added_to_body_parts() {
        let s = AgentStaticBuilder::new(AgentId(2), Locomotion::Legged)
            .hand(Arm::Left, BodyPartId(20))
            .build();
        assert!(s.owns(BodyPartId(20)));
        assert_eq!(s.hand(Arm::Left), Some(BodyPartId(20)));
        assert_eq!(s.hand(Arm::Right), None);
        assert!(s.has_arms());
    }

    #[test]
    fn defaults() {
        let s = AgentStaticBuilder::new(AgentId(9), Locomotion::Wheelchair).build();
        assert_eq!(s.name(), "agent_9");
        assert_eq!(s.locomotion(), Locomotion::Wheelchair);
        assert!(s.radius() > 0.0);
    }
}

#[cfg(test)]
mod policy_tests {
    use super::*;

    #[test]
    fn walls_and_floor_are_independent() {
        let mut p = CollisionDetection::default();
        assert!(p.counts(WALL));
        assert!(!p.counts(FLOOR));
        p.walls = false;
        p.floor = true;
        assert!(!p.counts(WALL));
        assert!(p.counts(FLOOR));
    }

    #[test]
    fn exclusion_and_inclusion() {
        let mut p = CollisionDetection::default();
        p.exclude_objects.insert(ObjectId(5));
        assert!(!p.counts(Contact::Object(ObjectId(5))));
        assert!(p.counts(Contact::Object(ObjectId(6))));

        p.objects = false;
        p.include_objects.insert(ObjectId(7));
        assert!(p.counts(Contact::Object(ObjectId(7))));
        assert!(!p.counts(Contact::Object(ObjectId(6))));
        assert!(!p.counts(Contact::Agent(AgentId(2))));
    }

    #[test]
    fn overlap_obstruction() {
        let mut p = CollisionDetection::default();
        p.exclude_objects.insert(ObjectId(5));
        let held_only = OverlapResult { objects: vec![ObjectId(5)], ..OverlapResult::default() };
        assert!(!p.is_obstructed(&held_only));
        let wall = OverlapResult { walls: true, ..OverlapResult::default() };
        assert!(p.is_obstructed(&wall));
        let chair = OverlapResult { objects: vec![ObjectId(5), ObjectId(8)], ..OverlapResult::default() };
        assert!(p.is_obstructed(&chair));
    }

    #[test]
    fn none_ignores_everything() {
        let p = CollisionDetection::none();
        assert!(!p.counts(WALL));
        assert!(!p.counts(Contact::Object(ObjectId(1))));
        assert!(!p.avoid);
    }
}

#[cfg(test)]
mod collision_enter_tests {
    use super::*;

    #[test]
    fn counted_enter_is_reported() {
        let d = dynamic_with(vec![event(1, WALL, ContactPhase::Enter)]);
        assert_eq!(d.collision_enters(&CollisionDetection::default()), vec![BodyPartId(1)]);
    }

    #[test]
    fn enter_and_exit_in_same_tick_cancel() {
        let d = dynamic_with(vec![
            event(1, WALL, ContactPhase::Enter),
            event(1, WALL, ContactPhase::Exit),
            event(2, Contact::Object(ObjectId(3)), ContactPhase::Enter),
        ]);
        assert_eq!(d.collision_enters(&CollisionDetection::default()), vec![BodyPartId(2)]);
    }

    #[test]
    fn stays_and_ignored_contacts_do_not_count() {
        let mut p = CollisionDetection::default();
        p.exclude_objects.insert(ObjectId(3));
        let d = dynamic_with(vec![
            event(1, WALL, ContactPhase::Stay),
            event(2, Contact::Object(ObjectId(3)), ContactPhase::Enter),
            event(3, FLOOR, ContactPhase::Enter),
        ]);
        assert!(d.collision_enters(&p).is_empty());
    }
}

#[cfg(test)]
mod lease_tests {
    use super::*;

    #[test]
    fn release_restores_first_captured_avoid() {
        let mut policy = CollisionDetection::default();
        let mut lease = PolicyLease::new();
        lease.set_avoid(&mut policy, false);
        lease.set_avoid(&mut policy, true);
        policy.avoid = false;
        lease.set_avoid(&mut policy, false);
        assert!(lease.is_held());
        lease.release(&mut policy);
        assert!(policy.avoid);
        assert!(!lease.is_held());
    }

    #[test]
    fn only_added_exclusions_are_removed() {
        let mut policy = CollisionDetection::default();
        policy.exclude_objects.insert(ObjectId(1));
        let mut lease = PolicyLease::new();
        lease.exclude_all(&mut policy, [ObjectId(1), ObjectId(2)]);
        assert_eq!(policy.exclude_objects.len(), 2);
        lease.release(&mut policy);
        assert!(policy.exclude_objects.contains(&ObjectId(1)));
        assert!(!policy.exclude_objects.contains(&ObjectId(2)));
    }

    #[test]
    fn double_release_is_harmless() {
        let mut policy = CollisionDetection::default();
        let mut lease = PolicyLease::new();
        lease.set_avoid(&mut policy, false);
        lease.release(&mut policy);
        policy.avoid = false;
        lease.release(&mut policy);
        assert!(!policy.avoid);
    }
}
