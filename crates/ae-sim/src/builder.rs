//! Fluent builder for constructing a [`Session`].

use std::collections::BTreeMap;

use ae_agent::{AgentStatic, CollisionDetection};
use ae_command::CommandBatch;
use ae_core::{AgentId, EngineConfig, EngineError, FrameClock};
use ae_orchestrator::Orchestrator;
use tracing::info;

use crate::{Backend, Session, SessionError, SessionResult};

/// Fluent builder for [`Session<B>`].
///
/// # Required inputs
///
/// - [`EngineConfig`] — shared by every agent added with [`agent`](Self::agent)
/// - `B: Backend` — the simulation backend
///
/// # Agents
///
/// | Method                      | Policy                                  |
/// |-----------------------------|-----------------------------------------|
/// | `.agent(s)`                 | `CollisionDetection::default()`         |
/// | `.agent_with_policy(s, p)`  | `p`                                     |
/// | `.orchestrator(o)`          | whatever `o` was built with             |
///
/// # Example
///
/// ```rust,ignore
/// let session = SessionBuilder::new(config, backend)
///     .agent(AgentStaticBuilder::new(AgentId(3), Locomotion::Wheelchair).build())
///     .agent(AgentStaticBuilder::new(AgentId(7), Locomotion::Legged).build())
///     .build()?;
/// ```
pub struct SessionBuilder<B: Backend> {
    config:        EngineConfig,
    backend:       B,
    orchestrators: Vec<Orchestrator>,
}

impl<B: Backend> SessionBuilder<B> {
    pub fn new(config: EngineConfig, backend: B) -> Self {
        Self { config, backend, orchestrators: Vec::new() }
    }

    /// Add an agent driven with the builder's config and the default policy.
    pub fn agent(self, agent: AgentStatic) -> Self {
        self.agent_with_policy(agent, CollisionDetection::default())
    }

    pub fn agent_with_policy(mut self, agent: AgentStatic, policy: CollisionDetection) -> Self {
        let orchestrator = Orchestrator::new(agent, self.config.clone()).with_policy(policy);
        self.orchestrators.push(orchestrator);
        self
    }

    /// Add a pre-built Orchestrator (it keeps its own config).
    pub fn orchestrator(mut self, orchestrator: Orchestrator) -> Self {
        self.orchestrators.push(orchestrator);
        self
    }

    /// Validate inputs, prime the backend with an empty batch, and return a
    /// ready-to-step [`Session`].
    pub fn build(mut self) -> SessionResult<Session<B>> {
        // ── Validate ──────────────────────────────────────────────────────
        self.config.validate()?;
        if self.orchestrators.is_empty() {
            return Err(SessionError::Config("a session needs at least one agent".into()));
        }
        let mut orchestrators: BTreeMap<AgentId, Orchestrator> = BTreeMap::new();
        for orchestrator in self.orchestrators {
            orchestrator.config().validate()?;
            let id = orchestrator.id();
            if orchestrators.insert(id, orchestrator).is_some() {
                return Err(EngineError::DuplicateAgent(id).into());
            }
        }

        // ── Prime ─────────────────────────────────────────────────────────
        let telemetry = self.backend.step(&CommandBatch::new())?;
        if let Some(&missing) = orchestrators.keys().find(|&&id| telemetry.agent(id).is_none()) {
            return Err(EngineError::AgentNotFound(missing).into());
        }

        let mut clock = if telemetry.frame_dt_secs > 0.0 {
            FrameClock::new(telemetry.frame_dt_secs)
        } else {
            FrameClock::default()
        };
        clock.current_tick = telemetry.tick;

        info!(agents = orchestrators.len(), frame_dt = clock.frame_dt_secs, "session ready");

        Ok(Session {
            config: self.config,
            clock,
            backend: self.backend,
            orchestrators,
            telemetry,
        })
    }
}
