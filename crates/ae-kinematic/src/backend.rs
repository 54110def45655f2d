//! The `KinematicBackend` and its per-tick step.

use std::collections::BTreeMap;

use ae_agent::AgentStatic;
use ae_command::{
    AgentFrame, Command, CommandBatch, Contact, ObjectFrame, OverlapResult, PathResult, Pose, TickTelemetry,
};
use ae_core::{AgentId, Arm, BodyPartId, Locomotion, ObjectId, Tick, Vec3};
use ae_sim::{Backend, BackendError, BackendResult};
use tracing::trace;

use crate::body::{Body, Gait};
use crate::{
    KinematicConfig, KinematicError, KinematicResult, OverlapBox, Planner, Room, Scene, SceneObject,
    StraightLinePlanner,
};

/// Gap below which two resting discs still count as touching, metres.
const TOUCH_EPSILON: f32 = 0.01;

/// A scene object plus its carry state.
struct ObjectState {
    object:  SceneObject,
    falling: bool,
}

// ── KinematicBackend ──────────────────────────────────────────────────────────

/// Deterministic stand-in for a physics engine.
///
/// Bodies are vertical discs in a walled room.  Per tick the backend:
///
/// 1. Executes the batch in order (actuation, arms, grasp/drop; queries are
///    queued).
/// 2. Integrates every body in ascending `AgentId` order.  A move that
///    would penetrate a wall, a solid obstacle, or another body is refused
///    and reported as a collision.
/// 3. Carries held objects to their hands and drops released ones.
/// 4. Answers the queued overlap and path queries against the new state.
///
/// With `noise == 0` two runs with the same batches produce bit-identical
/// telemetry.
///
/// Create via [`KinematicBackendBuilder`].
pub struct KinematicBackend<P: Planner = StraightLinePlanner> {
    config:  KinematicConfig,
    scene:   Scene,
    planner: P,
    bodies:  BTreeMap<AgentId, Body>,
    objects: BTreeMap<ObjectId, ObjectState>,
    tick:    Tick,
}

impl<P: Planner> KinematicBackend<P> {
    pub fn config(&self) -> &KinematicConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The tick the next `step` will report.
    #[inline]
    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn agent_pose(&self, id: AgentId) -> Option<Pose> {
        self.bodies.get(&id).map(Body::pose)
    }

    pub fn object_position(&self, id: ObjectId) -> Option<Vec3> {
        self.objects.get(&id).map(|o| o.object.position)
    }

    // ── Commands ──────────────────────────────────────────────────────────

    fn body_mut(&mut self, id: AgentId) -> BackendResult<&mut Body> {
        self.bodies.get_mut(&id).ok_or(BackendError::UnknownAgent(id))
    }

    fn wheelchair_mut(&mut self, id: AgentId) -> BackendResult<&mut Body> {
        let body = self.body_mut(id)?;
        if body.locomotion != Locomotion::Wheelchair {
            return Err(BackendError::Rejected(format!("wheel command for legged agent {id}")));
        }
        Ok(body)
    }

    fn ticks_for(&self, duration_secs: f32) -> u32 {
        ((duration_secs / self.config.frame_dt_secs).ceil() as u32).max(1)
    }

    /// Execute one command.  Queries are pushed onto `queries` and answered
    /// after integration.
    fn apply<'a>(&mut self, command: &'a Command, queries: &mut Vec<&'a Command>) -> BackendResult<()> {
        match command {
            Command::Walk { agent, forward, meters_per_tick, .. } => {
                let speed = if *forward { *meters_per_tick } else { -*meters_per_tick };
                self.body_mut(*agent)?.gait = Gait::Walk(speed);
            }
            Command::Turn { agent, degrees_per_tick } => {
                self.body_mut(*agent)?.gait = Gait::Turn(*degrees_per_tick);
            }
            Command::StopMotion { agent } => {
                self.body_mut(*agent)?.gait = Gait::Idle;
            }
            Command::PlayAnimation { agent, .. } => {
                let ticks = self.config.animation_ticks.max(1);
                self.body_mut(*agent)?.gait = Gait::Animation(ticks);
            }

            Command::SetMotorTorque { agent, left, right } => {
                self.wheelchair_mut(*agent)?.wheels.motor = [*left, *right];
            }
            Command::SetBrakeTorque { agent, left, right } => {
                self.wheelchair_mut(*agent)?.wheels.brake = [*left, *right];
            }
            Command::SetSteerAngle { agent, angle } => {
                // Casters follow the rear wheels; the angle is kept for
                // inspection only.
                self.wheelchair_mut(*agent)?.wheels.steer = *angle;
            }

            Command::RequestOverlap { query, .. } | Command::RequestPath { query, .. } => {
                self.body_mut(query.agent)?;
                queries.push(command);
            }

            Command::ReachFor { agent, arm, target, duration_secs, max_distance } => {
                let ticks = self.ticks_for(*duration_secs);
                self.body_mut(*agent)?.reach(*arm, *target, *max_distance, ticks);
            }
            Command::ResetArm { agent, arm, duration_secs } => {
                let ticks = self.ticks_for(*duration_secs);
                self.body_mut(*agent)?.reset_arm(*arm, ticks);
            }
            Command::StopArm { agent, arm } => {
                self.body_mut(*agent)?.stop_arm(*arm);
            }

            Command::Grasp { agent, arm, object } => self.grasp(*agent, *arm, *object)?,
            Command::Drop { agent, arm, object } => {
                let body = self.bodies.get_mut(agent).ok_or(BackendError::UnknownAgent(*agent))?;
                let state = self.objects.get_mut(object).ok_or(BackendError::UnknownObject(*object))?;
                if body.held.get(*arm) == Some(*object) {
                    body.held.set(*arm, None);
                    state.falling = true;
                }
            }
        }
        Ok(())
    }

    /// Take hold of a free prop within reach of the hand.  Anything else is
    /// a silent miss; the grasp action reads the outcome from `held`.
    fn grasp(&mut self, agent: AgentId, arm: Arm, object: ObjectId) -> BackendResult<()> {
        if !self.objects.contains_key(&object) {
            return Err(BackendError::UnknownObject(object));
        }
        let carried = self.bodies.values().any(|b| b.held.arm_of(object).is_some());
        let grasp_distance = self.config.grasp_distance;

        let body = self.bodies.get_mut(&agent).ok_or(BackendError::UnknownAgent(agent))?;
        let Some(state) = self.objects.get_mut(&object) else {
            return Err(BackendError::UnknownObject(object));
        };
        let in_reach = body.hand(arm).distance(state.object.position) <= grasp_distance;
        if !carried && !state.object.solid && body.held.get(arm).is_none() && in_reach {
            body.held.set(arm, Some(object));
            state.falling = false;
        }
        Ok(())
    }

    // ── Integration ───────────────────────────────────────────────────────

    /// What a disc of `radius` at `p` touches, with `slack` added to every
    /// distance test.  `me` is skipped among bodies.
    fn touching(&self, me: AgentId, p: Vec3, radius: f32, slack: f32) -> Vec<Contact> {
        let mut out = Vec::new();
        if !self.scene.room().contains(p, radius - slack) {
            out.push(Contact::Environment { floor: false });
        }
        out.extend(self.scene.solids_touching(p, radius + slack).into_iter().map(Contact::Object));
        out.extend(
            self.bodies
                .values()
                .filter(|b| b.id != me && b.position.planar_distance(p) < radius + b.radius + slack)
                .map(|b| Contact::Agent(b.id)),
        );
        out
    }

    fn integrate(&mut self) {
        let ids: Vec<AgentId> = self.bodies.keys().copied().collect();
        for id in ids {
            // Out of the map while it moves, so `touching` sees the others.
            let Some(mut body) = self.bodies.remove(&id) else {
                continue;
            };

            let (step, turn) = body.drive(&self.config);
            body.turn(turn);

            let mut blockers = Vec::new();
            if step != 0.0 {
                let proposed = body.position + body.forward() * step;
                blockers = self.touching(id, proposed, body.radius, 0.0);
                if blockers.is_empty() {
                    body.position = proposed;
                } else {
                    body.halt();
                }
            }

            let mut contacts = self.touching(id, body.position, body.radius, TOUCH_EPSILON);
            for b in blockers {
                if !contacts.contains(&b) {
                    contacts.push(b);
                }
            }
            body.update_contacts(contacts);
            body.advance_scripts();

            self.bodies.insert(id, body);
        }

        // ── Objects ───────────────────────────────────────────────────────
        for body in self.bodies.values() {
            for arm in Arm::BOTH {
                if let Some(state) = body.held.get(arm).and_then(|o| self.objects.get_mut(&o)) {
                    state.object.position = body.hand(arm);
                }
            }
        }
        let drop_speed = self.config.drop_speed;
        for state in self.objects.values_mut().filter(|s| s.falling) {
            let y = (state.object.position.y - drop_speed).max(0.0);
            state.object.position.y = y;
            if y <= 0.0 {
                state.falling = false;
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    fn answer(&self, request: &Command, telemetry: &mut TickTelemetry) {
        match request {
            Command::RequestOverlap { query, half_extents, position, rotation } => {
                let shape = OverlapBox::new(*position, *half_extents, rotation.yaw_degrees());
                telemetry.overlaps.push(OverlapResult {
                    query:   *query,
                    walls:   shape.hits_walls(self.scene.room()),
                    objects: self
                        .objects
                        .values()
                        .filter(|s| shape.hits_disc(s.object.position, s.object.radius))
                        .map(|s| s.object.id)
                        .collect(),
                    agents:  self
                        .bodies
                        .values()
                        .filter(|b| b.id != query.agent && shape.hits_disc(b.position, b.radius))
                        .map(|b| b.id)
                        .collect(),
                });
            }
            Command::RequestPath { query, origin, destination } => {
                let route = self.planner.plan(&self.scene, *origin, *destination);
                telemetry.paths.push(PathResult { query: *query, state: route.state, waypoints: route.waypoints });
            }
            _ => {}
        }
    }

    fn frame(&self, body: &Body) -> AgentFrame {
        AgentFrame {
            agent:       body.id,
            pose:        body.pose(),
            collisions:  body.events.clone(),
            held:        body.held,
            hands:       body.hands(),
            motion_done: body.motion_done(),
        }
    }
}

impl<P: Planner> Backend for KinematicBackend<P> {
    fn step(&mut self, commands: &CommandBatch) -> BackendResult<TickTelemetry> {
        let mut queries = Vec::new();
        for command in commands {
            self.apply(command, &mut queries)?;
        }
        self.integrate();

        let mut telemetry = TickTelemetry::new(self.tick, self.config.frame_dt_secs);
        for request in queries {
            self.answer(request, &mut telemetry);
        }
        telemetry.agents = self.bodies.values().map(|b| self.frame(b)).collect();
        telemetry.objects = self
            .objects
            .values()
            .map(|s| ObjectFrame { object: s.object.id, position: s.object.position })
            .collect();

        trace!(tick = %self.tick, commands = commands.len(), "kinematic step");
        self.tick = self.tick.next();
        Ok(telemetry)
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Fluent builder for [`KinematicBackend`].
///
/// ```rust,ignore
/// let backend = KinematicBackendBuilder::new(KinematicConfig::default())
///     .agent(&walker, Pose::new(Vec3::new(-4.0, 0.0, 0.0), 0.0))
///     .object(SceneObject::obstacle(ObjectId(1), Vec3::new(0.0, 0.0, 2.0), 0.5))
///     .planner(GridPlanner::default())
///     .build()?;
/// ```
pub struct KinematicBackendBuilder<P: Planner = StraightLinePlanner> {
    config:  KinematicConfig,
    planner: P,
    agents:  Vec<(AgentId, BodyPartId, Locomotion, f32, Pose)>,
    objects: Vec<SceneObject>,
}

impl KinematicBackendBuilder<StraightLinePlanner> {
    pub fn new(config: KinematicConfig) -> Self {
        Self { config, planner: StraightLinePlanner, agents: Vec::new(), objects: Vec::new() }
    }
}

impl<P: Planner> KinematicBackendBuilder<P> {
    /// Replace the path planner.
    pub fn planner<Q: Planner>(self, planner: Q) -> KinematicBackendBuilder<Q> {
        KinematicBackendBuilder { config: self.config, planner, agents: self.agents, objects: self.objects }
    }

    /// Spawn `agent` at `pose`.  Contacts are reported on the agent's first
    /// body part, or on `BodyPartId(agent id)` if it declares none.
    pub fn agent(mut self, agent: &AgentStatic, pose: Pose) -> Self {
        let part = agent.body_parts().first().copied().unwrap_or(BodyPartId(agent.id().0));
        self.agents.push((agent.id(), part, agent.locomotion(), agent.radius(), pose));
        self
    }

    pub fn object(mut self, object: SceneObject) -> Self {
        self.objects.push(object);
        self
    }

    pub fn objects(mut self, objects: impl IntoIterator<Item = SceneObject>) -> Self {
        self.objects.extend(objects);
        self
    }

    pub fn build(self) -> KinematicResult<KinematicBackend<P>> {
        self.config.validate()?;
        let room = Room::new(self.config.room_half_width, self.config.room_half_depth);

        let mut objects = BTreeMap::new();
        for object in &self.objects {
            if objects.insert(object.id, ObjectState { object: *object, falling: false }).is_some() {
                return Err(KinematicError::DuplicateObject(object.id));
            }
        }
        let scene = Scene::new(room, &self.objects);

        let mut bodies = BTreeMap::new();
        for (id, part, locomotion, radius, pose) in self.agents {
            if scene.is_blocked(pose.position, radius) {
                return Err(KinematicError::BlockedSpawn { agent: id, position: pose.position });
            }
            let body = Body::new(id, part, locomotion, radius, pose, self.config.seed);
            if bodies.insert(id, body).is_some() {
                return Err(KinematicError::DuplicateAgent(id));
            }
        }

        Ok(KinematicBackend {
            config: self.config,
            scene,
            planner: self.planner,
            bodies,
            objects,
            tick: Tick::ZERO,
        })
    }
}
