//! The `TraceWriter` trait implemented by trace backends.

use crate::{OutputResult, PoseRow, StatusRow};

/// Sink for session traces.
///
/// Errors are returned to [`TraceObserver`][crate::TraceObserver], which
/// stores the first one for [`take_error`][crate::TraceObserver::take_error].
pub trait TraceWriter {
    /// Write the poses of every agent for one tick.
    fn write_poses(&mut self, rows: &[PoseRow]) -> OutputResult<()>;

    /// Write one status transition.
    fn write_status(&mut self, row: &StatusRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Calling it again after success is a no-op.
    fn finish(&mut self) -> OutputResult<()>;
}
