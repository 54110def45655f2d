//! The `Session` struct and its tick loop.

use std::collections::BTreeMap;

use ae_action::{ActionStatus, PeerIndex};
use ae_command::{CommandBatch, TickTelemetry};
use ae_core::{AgentId, EngineConfig, EngineError, FrameClock, Tick};
use ae_orchestrator::Orchestrator;
use tracing::{info, trace};

use crate::{Backend, SessionError, SessionObserver, SessionResult};

/// Drives many Orchestrators against one [`Backend`], one round trip per
/// tick.
///
/// Orchestrators are stored in a `BTreeMap` so every loop over them runs
/// in ascending `AgentId` order, which keeps the merged batch (and therefore
/// the backend's behavior) deterministic.
///
/// Create via [`SessionBuilder`][crate::SessionBuilder].
pub struct Session<B: Backend> {
    /// Configuration the session was built with.
    pub config: EngineConfig,

    /// Current tick and physics frame time.
    pub clock: FrameClock,

    pub(crate) backend:       B,
    pub(crate) orchestrators: BTreeMap<AgentId, Orchestrator>,
    /// Telemetry the next tick will read.
    pub(crate) telemetry:     TickTelemetry,
}

impl<B: Backend> Session<B> {
    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick
    }

    /// The most recent backend reply.
    pub fn telemetry(&self) -> &TickTelemetry {
        &self.telemetry
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn orchestrator(&self, id: AgentId) -> Option<&Orchestrator> {
        self.orchestrators.get(&id)
    }

    /// Mutable access, e.g. to assign a new action between ticks.
    pub fn orchestrator_mut(&mut self, id: AgentId) -> Option<&mut Orchestrator> {
        self.orchestrators.get_mut(&id)
    }

    /// All Orchestrators in ascending id order.
    pub fn orchestrators(&self) -> impl Iterator<Item = &Orchestrator> {
        self.orchestrators.values()
    }

    pub fn status(&self, id: AgentId) -> Option<ActionStatus> {
        self.orchestrators.get(&id).map(Orchestrator::status)
    }

    /// `true` when no agent has an action in flight.
    pub fn is_idle(&self) -> bool {
        self.orchestrators.values().all(|o| !o.is_active())
    }

    // ── Tick loop ─────────────────────────────────────────────────────────

    /// Advance every agent once and exchange one batch with the backend.
    pub fn step<O: SessionObserver>(&mut self, observer: &mut O) -> SessionResult<()> {
        let now = self.clock.current_tick;
        // No agent advances unless every agent has a frame.
        if let Some(&missing) = self.orchestrators.keys().find(|&&id| self.telemetry.agent(id).is_none()) {
            return Err(EngineError::AgentNotFound(missing).into());
        }
        observer.on_tick_start(now);

        let peers = PeerIndex::from_telemetry(&self.telemetry);
        let mut batch = CommandBatch::new();

        for (&id, orchestrator) in self.orchestrators.iter_mut() {
            let before = orchestrator.status();
            let commands = orchestrator.tick(&self.telemetry, &peers)?;
            let after = orchestrator.status();
            if after != before {
                if let Some(action) = orchestrator.action() {
                    observer.on_status_change(now, id, action.tag(), after);
                }
            }
            batch.append(commands);
        }

        trace!(tick = %now, commands = batch.len(), "sending batch");
        observer.on_commands(now, &batch);

        self.telemetry = self.backend.step(&batch)?;
        observer.on_tick_end(now, &self.telemetry);
        self.clock.advance();
        Ok(())
    }

    /// Run exactly `n` ticks.
    pub fn run_ticks<O: SessionObserver>(&mut self, n: u64, observer: &mut O) -> SessionResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        Ok(())
    }

    /// Step until no agent is active, returning the number of ticks run.
    ///
    /// Fails with [`SessionError::Timeout`] if agents are still active after
    /// `max_ticks`.
    pub fn run_until_idle<O: SessionObserver>(
        &mut self,
        max_ticks: u64,
        observer:  &mut O,
    ) -> SessionResult<u64> {
        let start = self.clock.current_tick;
        info!(tick = %start, agents = self.orchestrators.len(), "session running");

        let mut ran = 0;
        while !self.is_idle() {
            if ran >= max_ticks {
                return Err(SessionError::Timeout { ticks: ran });
            }
            self.step(observer)?;
            ran += 1;
        }

        let end = self.clock.current_tick;
        info!(tick = %end, ticks = ran, "session idle");
        observer.on_session_end(end);
        Ok(ran)
    }
}
