//! Unit tests for ae-kinematic, plus end-to-end session scenarios.

use ae_action::{ActionKind, ActionStatus, ActionTag};
use ae_agent::{AgentStatic, AgentStaticBuilder, CollisionDetection};
use ae_command::{
    Command, CommandBatch, Contact, ContactPhase, PathState, Pose, TickTelemetry,
};
use ae_core::{AgentId, Arm, BodyPartId, EngineConfig, Locomotion, ObjectId, Quat, QueryId, Tick, Vec3};
use ae_sim::{Backend, BackendError, NoopObserver, Session, SessionBuilder, SessionObserver};

use crate::*;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn walker(id: u32) -> AgentStatic {
    AgentStaticBuilder::new(AgentId(id), Locomotion::Legged).build()
}

fn chair(id: u32) -> AgentStatic {
    AgentStaticBuilder::new(AgentId(id), Locomotion::Wheelchair).build()
}

fn handed(id: u32) -> AgentStatic {
    AgentStaticBuilder::new(AgentId(id), Locomotion::Legged)
        .body_parts([BodyPartId(100)])
        .hand(Arm::Left, BodyPartId(101))
        .hand(Arm::Right, BodyPartId(102))
        .build()
}

fn at(x: f32, z: f32) -> Pose {
    Pose::new(Vec3::new(x, 0.0, z), 0.0)
}

fn backend(agents: &[(&AgentStatic, Pose)]) -> KinematicBackend {
    agents
        .iter()
        .fold(KinematicBackendBuilder::new(KinematicConfig::default()), |b, (a, p)| b.agent(a, *p))
        .build()
        .unwrap()
}

fn step<P: Planner>(b: &mut KinematicBackend<P>, commands: Vec<Command>) -> TickTelemetry {
    b.step(&CommandBatch::from(commands)).unwrap()
}

fn walk(id: u32, speed: f32) -> Command {
    Command::Walk { agent: AgentId(id), animation: "walking_2".into(), forward: true, meters_per_tick: speed }
}

fn quiet() -> CollisionDetection {
    CollisionDetection { avoid: false, ..CollisionDetection::default() }
}

fn session<P: Planner>(backend: KinematicBackend<P>, agents: Vec<(AgentStatic, CollisionDetection)>) -> Session<KinematicBackend<P>> {
    agents
        .into_iter()
        .fold(SessionBuilder::new(EngineConfig::default(), backend), |b, (a, p)| b.agent_with_policy(a, p))
        .build()
        .unwrap()
}

fn position<P: Planner>(s: &Session<KinematicBackend<P>>, id: u32) -> Vec3 {
    s.backend().agent_pose(AgentId(id)).unwrap().position
}

/// Records status changes, merged batches, and agent-agent contacts.
#[derive(Default)]
struct Recorder {
    changes:        Vec<(Tick, AgentId, ActionTag, ActionStatus)>,
    batches:        Vec<CommandBatch>,
    agent_contacts: usize,
}

impl SessionObserver for Recorder {
    fn on_commands(&mut self, _tick: Tick, commands: &CommandBatch) {
        self.batches.push(commands.clone());
    }

    fn on_status_change(&mut self, tick: Tick, agent: AgentId, action: ActionTag, status: ActionStatus) {
        self.changes.push((tick, agent, action, status));
    }

    fn on_tick_end(&mut self, _tick: Tick, telemetry: &TickTelemetry) {
        self.agent_contacts += telemetry
            .agents
            .iter()
            .flat_map(|a| &a.collisions)
            .filter(|c| matches!(c.contact, Contact::Agent(_)))
            .count();
    }
}

impl Recorder {
    fn saw(&self, status: ActionStatus) -> bool {
        self.changes.iter().any(|c| c.3 == status)
    }
}

// ── Scene and overlap geometry ────────────────────────────────────────────────

#[cfg(test)]
mod scene_tests {
    use super::*;

    fn scene() -> Scene {
        Scene::new(Room::new(5.0, 5.0), &[
            SceneObject::obstacle(ObjectId(1), Vec3::new(1.0, 0.0, 0.0), 0.5),
            SceneObject::obstacle(ObjectId(2), Vec3::new(2.0, 0.0, 0.0), 0.5),
            SceneObject::prop(ObjectId(3), Vec3::new(0.0, 0.0, 0.0)),
        ])
    }

    #[test]
    fn props_are_not_indexed() {
        assert_eq!(scene().obstacle_count(), 2);
    }

    #[test]
    fn solids_touching_nearest_first() {
        let s = scene();
        assert_eq!(s.solids_touching(Vec3::new(1.6, 0.0, 0.0), 0.3), vec![ObjectId(2), ObjectId(1)]);
        assert!(s.solids_touching(Vec3::new(1.0, 0.0, 2.0), 0.3).is_empty());
    }

    #[test]
    fn blocked_by_walls_and_obstacles() {
        let s = scene();
        assert!(s.is_blocked(Vec3::new(4.9, 0.0, 0.0), 0.3));
        assert!(s.is_blocked(Vec3::new(1.0, 0.0, 0.7), 0.3));
        assert!(!s.is_blocked(Vec3::new(-2.0, 0.0, -2.0), 0.3));
    }

    #[test]
    fn rotated_box_uses_its_own_axes() {
        // Facing +X: the box is thin along X and wide along Z.
        let shape = OverlapBox::new(Vec3::ZERO, Vec3::new(0.3, 1.0, 0.1), 90.0);
        assert!(!shape.hits_disc(Vec3::new(0.35, 0.0, 0.0), 0.1));
        assert!(shape.hits_disc(Vec3::new(0.0, 0.0, 0.35), 0.1));
    }

    #[test]
    fn box_height_is_checked() {
        let shape = OverlapBox::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.3, 0.5, 0.3), 0.0);
        assert!(shape.hits_disc(Vec3::new(0.0, 0.6, 0.0), 0.05));
        assert!(!shape.hits_disc(Vec3::new(0.0, 2.0, 0.0), 0.05));
    }

    #[test]
    fn box_past_wall() {
        let room = Room::new(5.0, 5.0);
        let half = Vec3::new(0.3, 0.9, 0.1);
        assert!(OverlapBox::new(Vec3::new(0.0, 0.9, 4.95), half, 0.0).hits_walls(room));
        assert!(!OverlapBox::new(Vec3::new(0.0, 0.9, 4.5), half, 0.0).hits_walls(room));
    }
}

// ── Planners ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod planner_tests {
    use super::*;

    fn pillar_scene() -> Scene {
        Scene::new(Room::new(5.0, 5.0), &[SceneObject::obstacle(ObjectId(1), Vec3::ZERO, 0.5)])
    }

    #[test]
    fn straight_line_is_origin_then_destination() {
        let (a, b) = (Vec3::new(0.0, 0.0, -3.0), Vec3::new(0.0, 0.0, 3.0));
        let route = StraightLinePlanner.plan(&pillar_scene(), a, b);
        assert_eq!(route.state, PathState::Complete);
        assert_eq!(route.waypoints, vec![a, b]);
    }

    #[test]
    fn straight_line_rejects_blocked_destination() {
        let s = pillar_scene();
        assert_eq!(StraightLinePlanner.plan(&s, Vec3::new(0.0, 0.0, -3.0), Vec3::ZERO).state, PathState::Invalid);
        assert_eq!(
            StraightLinePlanner.plan(&s, Vec3::ZERO, Vec3::new(9.0, 0.0, 0.0)).state,
            PathState::Invalid
        );
    }

    #[test]
    fn grid_routes_around_obstacle() {
        let (a, b) = (Vec3::new(0.0, 0.0, -3.0), Vec3::new(0.0, 0.0, 3.0));
        let route = GridPlanner::default().plan(&pillar_scene(), a, b);
        assert_eq!(route.state, PathState::Complete);
        assert!(route.waypoints.len() > 2);
        assert_eq!(route.waypoints.first(), Some(&a));
        assert_eq!(route.waypoints.last(), Some(&b));

        // Sample every segment: nothing comes within body radius of the pillar.
        for w in route.waypoints.windows(2) {
            for i in 0..=20 {
                let p = w[0] + (w[1] - w[0]) * (i as f32 / 20.0);
                assert!(p.planar_distance(Vec3::ZERO) > 0.8, "{p} too close");
            }
        }
    }

    #[test]
    fn grid_rejects_unreachable_destination() {
        let s = pillar_scene();
        let planner = GridPlanner::default();
        assert_eq!(planner.plan(&s, Vec3::new(0.0, 0.0, -3.0), Vec3::new(0.0, 0.0, 0.6)).state, PathState::Invalid);
        assert_eq!(planner.plan(&s, Vec3::new(0.0, 0.0, -3.0), Vec3::new(0.0, 0.0, 7.0)).state, PathState::Invalid);
    }
}

// ── Backend physics ───────────────────────────────────────────────────────────

#[cfg(test)]
mod physics_tests {
    use super::*;

    #[test]
    fn builder_rejects_bad_inputs() {
        let w = walker(1);
        let dup = KinematicBackendBuilder::new(KinematicConfig::default())
            .agent(&w, at(0.0, 0.0))
            .agent(&w, at(2.0, 0.0))
            .build();
        assert!(matches!(dup, Err(KinematicError::DuplicateAgent(AgentId(1)))));

        let outside = KinematicBackendBuilder::new(KinematicConfig::default()).agent(&w, at(0.0, 9.9)).build();
        assert!(matches!(outside, Err(KinematicError::BlockedSpawn { .. })));

        let config = KinematicConfig { frame_dt_secs: 0.0, ..KinematicConfig::default() };
        assert!(matches!(KinematicBackendBuilder::new(config).build(), Err(KinematicError::Config(_))));
    }

    #[test]
    fn ticks_count_up_from_zero() {
        let w = walker(1);
        let mut b = backend(&[(&w, at(0.0, 0.0))]);
        assert_eq!(step(&mut b, vec![]).tick, Tick(0));
        assert_eq!(step(&mut b, vec![]).tick, Tick(1));
        assert_eq!(b.tick(), Tick(2));
    }

    #[test]
    fn walk_until_stopped() {
        let w = walker(1);
        let mut b = backend(&[(&w, at(0.0, 0.0))]);
        step(&mut b, vec![walk(1, 0.05)]);
        let t = step(&mut b, vec![]);
        assert!((t.agent(AgentId(1)).unwrap().pose.position.z - 0.10).abs() < 1e-5);
        step(&mut b, vec![Command::StopMotion { agent: AgentId(1) }]);
        let t = step(&mut b, vec![]);
        assert!((t.agent(AgentId(1)).unwrap().pose.position.z - 0.10).abs() < 1e-5);
    }

    #[test]
    fn turn_in_place() {
        let w = walker(1);
        let mut b = backend(&[(&w, at(0.0, 0.0))]);
        step(&mut b, vec![Command::Turn { agent: AgentId(1), degrees_per_tick: 3.0 }]);
        for _ in 0..29 {
            step(&mut b, vec![]);
        }
        let pose = b.agent_pose(AgentId(1)).unwrap();
        assert!((pose.yaw_degrees() - 90.0).abs() < 1e-3);
        assert_eq!(pose.position, Vec3::ZERO);
    }

    #[test]
    fn wheels_coast_to_a_stop_after_braking() {
        let c = chair(1);
        let id = AgentId(1);
        let mut b = backend(&[(&c, at(0.0, 0.0))]);
        step(&mut b, vec![Command::SetMotorTorque { agent: id, left: 10.0, right: 10.0 }]);
        assert!((b.agent_pose(id).unwrap().position.z - 0.05).abs() < 1e-5);

        step(&mut b, vec![
            Command::SetMotorTorque { agent: id, left: 0.0, right: 0.0 },
            Command::SetBrakeTorque { agent: id, left: 10.0, right: 10.0 },
        ]);
        for _ in 0..40 {
            step(&mut b, vec![]);
        }
        let z = b.agent_pose(id).unwrap().position.z;
        // 0.05 powered + 0.05 * (2/3) / (1/3) coasting.
        assert!(z > 0.14 && z < 0.151, "z = {z}");
        step(&mut b, vec![]);
        assert_eq!(b.agent_pose(id).unwrap().position.z, z);
    }

    #[test]
    fn counter_rotating_wheels_turn_clockwise() {
        let c = chair(1);
        let id = AgentId(1);
        let mut b = backend(&[(&c, at(0.0, 0.0))]);
        step(&mut b, vec![Command::SetMotorTorque { agent: id, left: 15.0, right: -15.0 }]);
        let pose = b.agent_pose(id).unwrap();
        assert!((pose.yaw_degrees() - 3.0).abs() < 1e-3);
        assert!(pose.position.length() < 1e-6);
    }

    #[test]
    fn wheel_command_for_legged_agent_rejected() {
        let w = walker(1);
        let mut b = backend(&[(&w, at(0.0, 0.0))]);
        let result = b.step(&CommandBatch::from(vec![Command::SetBrakeTorque { agent: AgentId(1), left: 1.0, right: 1.0 }]));
        assert!(matches!(result, Err(BackendError::Rejected(_))));
    }

    #[test]
    fn unknown_agent_rejected() {
        let w = walker(1);
        let mut b = backend(&[(&w, at(0.0, 0.0))]);
        let result = b.step(&CommandBatch::from(vec![walk(99, 0.05)]));
        assert!(matches!(result, Err(BackendError::UnknownAgent(AgentId(99)))));
    }

    #[test]
    fn wall_blocks_with_enter_stay_exit() {
        let w = walker(1);
        let id = AgentId(1);
        let wall = Contact::Environment { floor: false };
        let mut b = backend(&[(&w, at(0.0, 9.62))]);

        let t = step(&mut b, vec![walk(1, 0.05)]);
        assert!(t.agent(id).unwrap().collisions.is_empty());
        let z = t.agent(id).unwrap().pose.position.z;

        let t = step(&mut b, vec![]);
        let frame = t.agent(id).unwrap();
        assert_eq!(frame.pose.position.z, z);
        assert_eq!(frame.collisions.len(), 1);
        assert_eq!(frame.collisions[0].contact, wall);
        assert_eq!(frame.collisions[0].phase, ContactPhase::Enter);
        assert_eq!(frame.collisions[0].body_part, BodyPartId(1));

        let t = step(&mut b, vec![]);
        assert_eq!(t.agent(id).unwrap().collisions[0].phase, ContactPhase::Stay);

        let t = step(&mut b, vec![Command::StopMotion { agent: id }]);
        assert_eq!(t.agent(id).unwrap().collisions[0].phase, ContactPhase::Exit);
    }

    #[test]
    fn bodies_block_each_other() {
        let (w1, w2) = (walker(1), walker(2));
        let mut b = backend(&[(&w1, at(0.0, 0.0)), (&w2, at(0.0, 0.62))]);
        let t = step(&mut b, vec![walk(1, 0.05)]);
        let frame = t.agent(AgentId(1)).unwrap();
        assert_eq!(frame.pose.position, Vec3::ZERO);
        assert_eq!(frame.collisions[0].contact, Contact::Agent(AgentId(2)));
        assert!(t.agent(AgentId(2)).unwrap().collisions.is_empty());
    }

    #[test]
    fn overlap_reports_scene_and_skips_requester() {
        let (w1, w2) = (walker(1), walker(2));
        let mut b = KinematicBackendBuilder::new(KinematicConfig::default())
            .agent(&w1, at(0.0, 0.0))
            .agent(&w2, at(0.0, 0.8))
            .object(SceneObject::prop(ObjectId(5), Vec3::new(0.1, 0.5, 0.5)))
            .object(SceneObject::obstacle(ObjectId(6), Vec3::new(3.0, 0.0, 3.0), 0.5))
            .build()
            .unwrap();
        let half = Vec3::new(0.31875, 0.8814, 0.0875);
        let near = QueryId::new(AgentId(1), 0);
        let wall = QueryId::new(AgentId(1), 1);
        let t = step(&mut b, vec![
            Command::RequestOverlap { query: near, half_extents: half, position: Vec3::new(0.0, 0.88, 0.5), rotation: Quat::IDENTITY },
            Command::RequestOverlap { query: wall, half_extents: half, position: Vec3::new(0.0, 0.88, 9.95), rotation: Quat::IDENTITY },
        ]);

        let near = t.overlap(near).unwrap();
        assert!(!near.walls);
        assert_eq!(near.objects, vec![ObjectId(5)]);
        assert_eq!(near.agents, vec![AgentId(2)]);
        assert!(t.overlap(wall).unwrap().walls);
    }

    #[test]
    fn path_answered_in_same_step() {
        let w = walker(1);
        let mut b = backend(&[(&w, at(0.0, 0.0))]);
        let (ok, bad) = (QueryId::new(AgentId(1), 0), QueryId::new(AgentId(1), 1));
        let dest = Vec3::new(3.0, 0.0, 3.0);
        let t = step(&mut b, vec![
            Command::RequestPath { query: ok, origin: Vec3::ZERO, destination: dest },
            Command::RequestPath { query: bad, origin: Vec3::ZERO, destination: Vec3::new(30.0, 0.0, 0.0) },
        ]);
        assert_eq!(t.path(ok).unwrap().waypoints, vec![Vec3::ZERO, dest]);
        assert!(t.path(ok).unwrap().is_complete());
        assert_eq!(t.path(bad).unwrap().state, PathState::Invalid);
    }

    #[test]
    fn animation_reports_motion_done_when_finished() {
        let w = walker(1);
        let mut b = backend(&[(&w, at(0.0, 0.0))]);
        let t = step(&mut b, vec![Command::PlayAnimation { agent: AgentId(1), name: "wave".into(), forward: true }]);
        assert!(!t.agent(AgentId(1)).unwrap().motion_done);
        for _ in 0..28 {
            assert!(!step(&mut b, vec![]).agent(AgentId(1)).unwrap().motion_done);
        }
        assert!(step(&mut b, vec![]).agent(AgentId(1)).unwrap().motion_done);
    }

    #[test]
    fn reach_moves_hand_to_target() {
        let w = handed(1);
        let mut b = backend(&[(&w, at(0.0, 0.0))]);
        let target = Vec3::new(0.3, 1.0, 0.5);
        let t = step(&mut b, vec![Command::ReachFor {
            agent: AgentId(1),
            arm: Arm::Right,
            target,
            duration_secs: 0.1,
            max_distance: 1.5,
        }]);
        assert!(!t.agent(AgentId(1)).unwrap().motion_done);
        let mut last = t;
        for _ in 0..10 {
            last = step(&mut b, vec![]);
        }
        let frame = last.agent(AgentId(1)).unwrap();
        assert!(frame.motion_done);
        assert!(frame.hands.right.distance(target) < 1e-4);
        assert!((frame.hands.left.x + 0.2).abs() < 1e-5);
    }

    #[test]
    fn grasp_carries_and_drop_falls_to_floor() {
        let w = handed(1);
        let id = AgentId(1);
        let mut b = KinematicBackendBuilder::new(KinematicConfig::default())
            .agent(&w, at(0.0, 0.0))
            .object(SceneObject::prop(ObjectId(5), Vec3::new(0.2, 0.9, 0.2)))
            .object(SceneObject::prop(ObjectId(6), Vec3::new(2.0, 0.0, 2.0)))
            .object(SceneObject::obstacle(ObjectId(7), Vec3::new(0.0, 0.0, -1.0), 0.3))
            .build()
            .unwrap();

        let t = step(&mut b, vec![
            Command::Grasp { agent: id, arm: Arm::Right, object: ObjectId(5) },
            Command::Grasp { agent: id, arm: Arm::Left, object: ObjectId(6) },
        ]);
        let frame = t.agent(id).unwrap();
        assert_eq!(frame.held.right, Some(ObjectId(5)));
        assert_eq!(frame.held.left, None);
        assert_eq!(t.object_position(ObjectId(5)), Some(frame.hands.right));

        let t = step(&mut b, vec![Command::Grasp { agent: id, arm: Arm::Left, object: ObjectId(7) }]);
        assert_eq!(t.agent(id).unwrap().held.left, None);

        let t = step(&mut b, vec![Command::Drop { agent: id, arm: Arm::Right, object: ObjectId(5) }]);
        assert_eq!(t.agent(id).unwrap().held.right, None);
        assert!((t.object_position(ObjectId(5)).unwrap().y - 0.7).abs() < 1e-5);
        for _ in 0..6 {
            step(&mut b, vec![]);
        }
        assert_eq!(b.object_position(ObjectId(5)).unwrap().y, 0.0);
    }

    #[test]
    fn unknown_object_rejected() {
        let w = handed(1);
        let mut b = backend(&[(&w, at(0.0, 0.0))]);
        let result = b.step(&CommandBatch::from(vec![Command::Grasp { agent: AgentId(1), arm: Arm::Left, object: ObjectId(42) }]));
        assert!(matches!(result, Err(BackendError::UnknownObject(ObjectId(42)))));
    }

    #[test]
    fn noise_is_seeded_per_agent() {
        let run = |seed: u64| {
            let w = walker(1);
            let config = KinematicConfig { noise: 0.2, seed, ..KinematicConfig::default() };
            let mut b = KinematicBackendBuilder::new(config).agent(&w, at(0.0, 0.0)).build().unwrap();
            step(&mut b, vec![walk(1, 0.05)]);
            for _ in 0..19 {
                step(&mut b, vec![]);
            }
            b.agent_pose(AgentId(1)).unwrap().position.z
        };
        assert_eq!(run(7), run(7));
        assert_ne!(run(7), run(8));
        assert!((run(7) - 1.0).abs() < 0.2);
    }
}

// ── End-to-end scenarios ──────────────────────────────────────────────────────

#[cfg(test)]
mod scenario_tests {
    use super::*;

    #[test]
    fn legged_move_by_terminates_within_bound() {
        let w = walker(1);
        let mut s = session(backend(&[(&w, at(0.0, 0.0))]), vec![(w, CollisionDetection::default())]);
        s.orchestrator_mut(AgentId(1)).unwrap().move_by(2.0);
        let ticks = s.run_until_idle(200, &mut NoopObserver).unwrap();

        let max_step = EngineConfig::default().walk.meters_per_tick;
        let bound = (2.0 / max_step).ceil() as u64 + 3;
        assert!(ticks <= bound, "{ticks} > {bound}");
        assert_eq!(s.status(AgentId(1)), Some(ActionStatus::Success));
        assert!((position(&s, 1).z - 2.0).abs() <= 0.1);
    }

    #[test]
    fn wheelchair_move_by_brakes_then_arrives() {
        let c = chair(1);
        let mut s = session(backend(&[(&c, at(0.0, 0.0))]), vec![(c, CollisionDetection::default())]);
        s.orchestrator_mut(AgentId(1)).unwrap().move_by(2.0);
        let mut rec = Recorder::default();
        s.run_until_idle(200, &mut rec).unwrap();

        assert_eq!(s.status(AgentId(1)), Some(ActionStatus::Success));
        assert!((position(&s, 1).z - 2.0).abs() <= 0.1, "z = {}", position(&s, 1).z);
        let brakes = rec
            .batches
            .iter()
            .flat_map(|b| b.iter())
            .filter(|c| matches!(c, Command::SetBrakeTorque { left, .. } if *left > 0.0))
            .count();
        assert!(brakes >= 1);
    }

    #[test]
    fn wheelchair_turn_by_succeeds() {
        let c = chair(1);
        let mut s = session(backend(&[(&c, at(0.0, 0.0))]), vec![(c, CollisionDetection::default())]);
        s.orchestrator_mut(AgentId(1)).unwrap().turn_by(90.0);
        s.run_until_idle(200, &mut NoopObserver).unwrap();

        assert_eq!(s.status(AgentId(1)), Some(ActionStatus::Success));
        let yaw = s.backend().agent_pose(AgentId(1)).unwrap().yaw_degrees();
        assert!((88.0..=94.0).contains(&yaw), "yaw = {yaw}");
    }

    #[test]
    fn overlap_detects_wall_before_contact() {
        let w = walker(1);
        let mut s = session(backend(&[(&w, at(0.0, 8.0))]), vec![(w, CollisionDetection::default())]);
        s.orchestrator_mut(AgentId(1)).unwrap().move_by(3.0);
        let mut rec = Recorder::default();
        s.run_until_idle(200, &mut rec).unwrap();

        assert_eq!(s.status(AgentId(1)), Some(ActionStatus::DetectedObstacle));
        assert!(!rec.saw(ActionStatus::Collision));
        assert!(position(&s, 1).z < 9.7);
    }

    #[test]
    fn repeat_collision_emits_no_motion() {
        let w = walker(1);
        let id = AgentId(1);
        let mut s = session(backend(&[(&w, at(0.0, 8.0))]), vec![(w, quiet())]);
        s.orchestrator_mut(id).unwrap().move_by(3.0);
        s.run_until_idle(200, &mut NoopObserver).unwrap();
        assert_eq!(s.status(id), Some(ActionStatus::Collision));

        s.orchestrator_mut(id).unwrap().move_by(1.0);
        assert_eq!(s.status(id), Some(ActionStatus::Collision));
        let mut rec = Recorder::default();
        s.step(&mut rec).unwrap();
        assert_eq!(rec.batches[0].motion_count(), 0);
        assert!(!s.orchestrator(id).unwrap().is_active());

        // Reversing away from the wall is allowed.
        s.orchestrator_mut(id).unwrap().move_by(-1.0);
        s.run_until_idle(200, &mut NoopObserver).unwrap();
        assert_eq!(s.status(id), Some(ActionStatus::Success));
    }

    #[test]
    fn lower_id_yields_and_nobody_collides() {
        let (a, b) = (walker(3), walker(7));
        let mut s = session(
            backend(&[(&a, at(-4.0, 0.0)), (&b, at(0.0, -4.0))]),
            vec![(a, CollisionDetection::default()), (b, CollisionDetection::default())],
        );
        s.orchestrator_mut(AgentId(3)).unwrap().navigate_to(Vec3::new(4.0, 0.0, 0.0));
        s.orchestrator_mut(AgentId(7)).unwrap().navigate_to(Vec3::new(0.0, 0.0, 4.0));

        let mut rec = Recorder::default();
        let mut first_yield = None;
        for _ in 0..1_000 {
            if s.is_idle() {
                break;
            }
            s.step(&mut rec).unwrap();
            let yielding = s.orchestrator(AgentId(3)).unwrap().action().is_some_and(|a| a.is_yielding());
            if yielding && first_yield.is_none() {
                first_yield = Some(s.current_tick());
            }
            assert!(!s.orchestrator(AgentId(7)).unwrap().action().is_some_and(|a| a.is_yielding()));
        }

        assert!(s.is_idle());
        assert!(first_yield.is_some());
        assert!(!rec.saw(ActionStatus::Collision));
        assert_eq!(rec.agent_contacts, 0);
        assert_eq!(s.status(AgentId(3)), Some(ActionStatus::Success));
        assert_eq!(s.status(AgentId(7)), Some(ActionStatus::Success));

        let yields = |id| match s.orchestrator(AgentId(id)).unwrap().action().map(|a| a.kind()) {
            Some(ActionKind::Navigate(n)) => n.yields(),
            _ => panic!("agent {id} lost its navigation"),
        };
        assert!(yields(3) >= 1);
        assert_eq!(yields(7), 0);
        assert!(position(&s, 3).distance(Vec3::new(4.0, 0.0, 0.0)) <= 0.2);
        assert!(position(&s, 7).distance(Vec3::new(0.0, 0.0, 4.0)) <= 0.2);
    }

    #[test]
    fn navigate_around_obstacle_with_grid_planner() {
        let w = walker(1);
        let backend = KinematicBackendBuilder::new(KinematicConfig::default())
            .agent(&w, at(0.0, -3.0))
            .object(SceneObject::obstacle(ObjectId(9), Vec3::ZERO, 0.5))
            .planner(GridPlanner::default())
            .build()
            .unwrap();
        let mut s = session(backend, vec![(w, CollisionDetection::default())]);
        let goal = Vec3::new(0.0, 0.0, 3.0);
        s.orchestrator_mut(AgentId(1)).unwrap().navigate_to(goal);

        let mut rec = Recorder::default();
        s.run_until_idle(3_000, &mut rec).unwrap();

        assert_eq!(s.status(AgentId(1)), Some(ActionStatus::Success));
        assert!(!rec.saw(ActionStatus::Collision));
        assert!(position(&s, 1).distance(goal) <= 0.2);
        // The avoidance flag is back on after navigation.
        assert!(s.orchestrator(AgentId(1)).unwrap().collision_detection().avoid);
    }

    #[test]
    fn reach_grasp_and_drop_a_prop() {
        let w = handed(1);
        let id = AgentId(1);
        let prop = ObjectId(5);
        let backend = KinematicBackendBuilder::new(KinematicConfig::default())
            .agent(&w, at(0.0, 0.0))
            .object(SceneObject::prop(prop, Vec3::new(0.2, 0.9, 0.5)))
            .build()
            .unwrap();
        let mut s = session(backend, vec![(w, CollisionDetection::default())]);

        s.orchestrator_mut(id).unwrap().reach_for(prop, [Arm::Right]);
        s.run_until_idle(100, &mut NoopObserver).unwrap();
        assert_eq!(s.status(id), Some(ActionStatus::Success));

        s.orchestrator_mut(id).unwrap().grasp(prop, Arm::Right);
        s.run_until_idle(100, &mut NoopObserver).unwrap();
        assert_eq!(s.status(id), Some(ActionStatus::Success));
        assert_eq!(s.telemetry().agent(id).unwrap().held.right, Some(prop));

        s.orchestrator_mut(id).unwrap().drop_held(Arm::Right);
        s.run_until_idle(100, &mut NoopObserver).unwrap();
        assert_eq!(s.status(id), Some(ActionStatus::Success));
        assert_eq!(s.backend().object_position(prop).unwrap().y, 0.0);
    }

    #[test]
    fn reach_beyond_max_distance_fails_without_moving() {
        let w = handed(1);
        let id = AgentId(1);
        let mut s = session(backend(&[(&w, at(0.0, 0.0))]), vec![(w, CollisionDetection::default())]);
        s.orchestrator_mut(id).unwrap().reach_for(Vec3::new(0.0, 1.0, 3.0), [Arm::Left]);
        let mut rec = Recorder::default();
        s.run_until_idle(10, &mut rec).unwrap();
        assert_eq!(s.status(id), Some(ActionStatus::CannotReach));
        assert_eq!(rec.batches[0].motion_count(), 0);
    }

    #[test]
    fn animation_plays_to_completion() {
        let w = walker(1);
        let mut s = session(backend(&[(&w, at(0.0, 0.0))]), vec![(w, CollisionDetection::default())]);
        s.orchestrator_mut(AgentId(1)).unwrap().animate("wave");
        let ticks = s.run_until_idle(100, &mut NoopObserver).unwrap();
        assert_eq!(s.status(AgentId(1)), Some(ActionStatus::Success));
        assert!(ticks >= 30);
    }
}
