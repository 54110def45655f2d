//! Everything an action may look at or touch during one lifecycle call.

use ae_agent::{AgentDynamic, AgentStatic, CollisionDetection};
use ae_command::{PendingQueries, TickTelemetry};
use ae_core::{AgentId, EngineConfig, Tick};

use crate::PeerIndex;

/// The per-call view handed to an [`Action`][crate::Action].
///
/// Built by the Orchestrator for one tick and dropped before the next, so an
/// action can never keep a reference to the agent's dynamic state.  The
/// policy and query table are the only mutable parts; composite actions pass
/// the same context down to their active child.
pub struct TickContext<'a> {
    pub tick:      Tick,
    pub telemetry: &'a TickTelemetry,
    pub agent:     &'a AgentStatic,
    pub dynamic:   &'a AgentDynamic,
    pub policy:    &'a mut CollisionDetection,
    pub queries:   &'a mut PendingQueries,
    pub config:    &'a EngineConfig,
    /// Positions of every agent in `telemetry`, including this one.
    pub peers:     &'a PeerIndex,
}

impl<'a> TickContext<'a> {
    #[allow(clippy::too_many_arguments)]
    #[inline]
    pub fn new(
        telemetry: &'a TickTelemetry,
        agent:     &'a AgentStatic,
        dynamic:   &'a AgentDynamic,
        policy:    &'a mut CollisionDetection,
        queries:   &'a mut PendingQueries,
        config:    &'a EngineConfig,
        peers:     &'a PeerIndex,
    ) -> Self {
        Self { tick: telemetry.tick, telemetry, agent, dynamic, policy, queries, config, peers }
    }

    #[inline]
    pub fn id(&self) -> AgentId {
        self.agent.id()
    }
}
