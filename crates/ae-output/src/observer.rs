//! `TraceObserver<W>` — bridges `SessionObserver` to a `TraceWriter`.

use ae_action::{ActionStatus, ActionTag};
use ae_command::TickTelemetry;
use ae_core::{AgentId, Tick};
use ae_sim::SessionObserver;
use tracing::warn;

use crate::row::{PoseRow, StatusRow};
use crate::writer::TraceWriter;
use crate::{OutputError, OutputResult};

/// A [`SessionObserver`] that records poses and status transitions to any
/// [`TraceWriter`].
///
/// `SessionObserver` methods have no return value, so the first writer error
/// is stored and later writes are skipped.  Check it with
/// [`take_error`][Self::take_error] once the session returns.
pub struct TraceObserver<W: TraceWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: TraceWriter> TraceObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error, if any.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Flush the writer.  Needed after `run_ticks`, which does not end the
    /// session.
    pub fn finish(&mut self) -> OutputResult<()> {
        self.writer.finish()
    }

    /// Unwrap the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn record(&mut self, write: impl FnOnce(&mut W) -> OutputResult<()>) {
        if self.last_error.is_some() {
            return;
        }
        if let Err(e) = write(&mut self.writer) {
            warn!(error = %e, "trace write failed; further rows are dropped");
            self.last_error = Some(e);
        }
    }
}

impl<W: TraceWriter> SessionObserver for TraceObserver<W> {
    fn on_status_change(&mut self, tick: Tick, agent: AgentId, action: ActionTag, status: ActionStatus) {
        let row = StatusRow { tick: tick.0, agent: agent.0, action: action.as_str(), status: status.as_str() };
        self.record(|w| w.write_status(&row));
    }

    fn on_tick_end(&mut self, tick: Tick, telemetry: &TickTelemetry) {
        let rows: Vec<PoseRow> = telemetry
            .agents
            .iter()
            .map(|frame| PoseRow {
                tick:        tick.0,
                agent:       frame.agent.0,
                x:           frame.pose.position.x,
                y:           frame.pose.position.y,
                z:           frame.pose.position.z,
                yaw:         frame.pose.yaw_degrees(),
                motion_done: frame.motion_done,
                collisions:  frame.collisions.len() as u32,
            })
            .collect();
        if !rows.is_empty() {
            self.record(|w| w.write_poses(&rows));
        }
    }

    fn on_session_end(&mut self, _final_tick: Tick) {
        self.record(|w| w.finish());
    }
}
