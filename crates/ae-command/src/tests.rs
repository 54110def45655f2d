//! Unit tests for ae-command.

use ae_core::{AgentId, Arm, ObjectId, QueryId, Tick, Vec3};

use crate::*;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn telemetry_with(overlaps: Vec<OverlapResult>, paths: Vec<PathResult>) -> TickTelemetry {
    TickTelemetry { overlaps, paths, ..TickTelemetry::new(Tick(1), 1.0 / 60.0) }
}

#[cfg(test)]
mod command_tests {
    use super::*;

    #[test]
    fn agent_of_query_is_requester() {
        let q = QueryId::new(AgentId(4), 0);
        let c = Command::RequestPath { query: q, origin: Vec3::ZERO, destination: Vec3::FORWARD };
        assert_eq!(c.agent(), AgentId(4));
    }

    #[test]
    fn zero_torque_is_not_motion() {
        let a = AgentId(1);
        assert!(!Command::SetMotorTorque { agent: a, left: 0.0, right: 0.0 }.is_motion());
        assert!(Command::SetMotorTorque { agent: a, left: 5.0, right: 5.0 }.is_motion());
        assert!(!Command::StopMotion { agent: a }.is_motion());
        assert!(!Command::SetBrakeTorque { agent: a, left: 5.0, right: 5.0 }.is_motion());
    }

    #[test]
    fn batch_preserves_order_when_appending() {
        let a = AgentId(1);
        let mut first: CommandBatch = vec![Command::StopMotion { agent: a }].into();
        let second: CommandBatch = [Command::Turn { agent: a, degrees_per_tick: 3.0 }].into_iter().collect();
        first.append(second);
        assert_eq!(first.len(), 2);
        assert!(matches!(first.as_slice()[0], Command::StopMotion { .. }));
        assert_eq!(first.motion_count(), 1);
    }
}

#[cfg(test)]
mod telemetry_tests {
    use super::*;

    #[test]
    fn pose_right_is_clockwise_of_forward() {
        let p = Pose::new(Vec3::ZERO, 0.0);
        let r = p.right();
        assert!((r.x - 1.0).abs() < 1e-5 && r.z.abs() < 1e-5);
    }

    #[test]
    fn held_objects_lookup() {
        let mut held = HeldObjects::default();
        held.set(Arm::Right, Some(ObjectId(9)));
        assert_eq!(held.get(Arm::Right), Some(ObjectId(9)));
        assert_eq!(held.arm_of(ObjectId(9)), Some(Arm::Right));
        assert_eq!(held.iter().collect::<Vec<_>>(), vec![ObjectId(9)]);
    }

    #[test]
    fn lookups_by_id() {
        let mut t = TickTelemetry::new(Tick(3), 0.02);
        t.agents.push(AgentFrame::new(AgentId(2), Pose::default()));
        t.objects.push(ObjectFrame { object: ObjectId(5), position: Vec3::new(1.0, 0.0, 0.0) });
        assert!(t.agent(AgentId(2)).is_some());
        assert!(t.agent(AgentId(3)).is_none());
        assert_eq!(t.object_position(ObjectId(5)), Some(Vec3::new(1.0, 0.0, 0.0)));
    }
}

#[cfg(test)]
mod query_tests {
    use super::*;

    #[test]
    fn ids_are_sequential_per_agent() {
        let mut q = PendingQueries::new(AgentId(3));
        let a = q.issue(QueryKind::Overlap, Tick(0));
        let b = q.issue(QueryKind::Path, Tick(0));
        assert_eq!(a, QueryId::new(AgentId(3), 0));
        assert_eq!(b, QueryId::new(AgentId(3), 1));
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn delivered_result_leaves_the_table() {
        let mut q = PendingQueries::new(AgentId(3));
        let id = q.issue(QueryKind::Overlap, Tick(0));
        let empty = telemetry_with(vec![], vec![]);
        assert!(q.overlap(id, &empty).is_none());
        assert!(q.is_pending(id));

        let reply = OverlapResult { query: id, walls: true, ..OverlapResult::default() };
        let t = telemetry_with(vec![reply], vec![]);
        assert!(q.overlap(id, &t).is_some_and(|r| r.walls));
        assert!(!q.is_pending(id));
    }

    #[test]
    fn age_and_cancel() {
        let mut q = PendingQueries::new(AgentId(1));
        let id = q.issue(QueryKind::Path, Tick(10));
        assert_eq!(q.age(id, Tick(14)), Some(4));
        assert!(q.cancel(id));
        assert!(!q.cancel(id));
        assert!(q.is_empty());
    }

    #[test]
    fn results_for_other_agents_are_ignored() {
        let mut q = PendingQueries::new(AgentId(3));
        let id = q.issue(QueryKind::Path, Tick(0));
        let foreign = PathResult { query: QueryId::new(AgentId(7), id.seq), ..PathResult::default() };
        let t = telemetry_with(vec![], vec![foreign]);
        assert!(q.path(id, &t).is_none());
    }

    #[test]
    #[should_panic]
    fn foreign_query_id_panics() {
        let mut q = PendingQueries::new(AgentId(3));
        let t = telemetry_with(vec![], vec![]);
        let _ = q.overlap(QueryId::new(AgentId(7), 0), &t);
    }
}
