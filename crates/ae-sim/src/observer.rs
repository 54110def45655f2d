//! Session observer trait for progress reporting and trace collection.

use ae_action::{ActionStatus, ActionTag};
use ae_command::{CommandBatch, TickTelemetry};
use ae_core::{AgentId, Tick};

/// Callbacks invoked by [`Session`][crate::Session] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — failure logger
///
/// ```rust,ignore
/// struct Failures(Vec<(AgentId, ActionStatus)>);
///
/// impl SessionObserver for Failures {
///     fn on_status_change(&mut self, _t: Tick, agent: AgentId, _a: ActionTag, s: ActionStatus) {
///         if s.is_failure() {
///             self.0.push((agent, s));
///         }
///     }
/// }
/// ```
pub trait SessionObserver {
    /// Called at the very start of each tick, before any Orchestrator runs.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called with the merged batch just before it is sent to the backend.
    fn on_commands(&mut self, _tick: Tick, _commands: &CommandBatch) {}

    /// Called when an agent's action status differs from the status it had
    /// at the start of the tick.
    fn on_status_change(
        &mut self,
        _tick:   Tick,
        _agent:  AgentId,
        _action: ActionTag,
        _status: ActionStatus,
    ) {}

    /// Called after the backend replied.  `telemetry` is what the next tick
    /// will read.
    fn on_tick_end(&mut self, _tick: Tick, _telemetry: &TickTelemetry) {}

    /// Called once when [`Session::run_until_idle`][crate::Session::run_until_idle]
    /// returns successfully.
    fn on_session_end(&mut self, _final_tick: Tick) {}
}

/// A [`SessionObserver`] that does nothing.
pub struct NoopObserver;

impl SessionObserver for NoopObserver {}
