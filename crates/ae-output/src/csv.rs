//! CSV trace backend.
//!
//! Creates two files in the configured output directory:
//! - `poses.csv`
//! - `statuses.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::TraceWriter;
use crate::{OutputResult, PoseRow, StatusRow};

pub const POSE_HEADER: [&str; 8] = ["tick", "agent", "x", "y", "z", "yaw", "motion_done", "collisions"];
pub const STATUS_HEADER: [&str; 4] = ["tick", "agent", "action", "status"];

/// Writes a session trace to two CSV files.
pub struct CsvTraceWriter {
    poses:    Writer<File>,
    statuses: Writer<File>,
    finished: bool,
}

impl CsvTraceWriter {
    /// Create the two CSV files in `dir` (which must exist) and write the
    /// header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut poses = Writer::from_path(dir.join("poses.csv"))?;
        poses.write_record(POSE_HEADER)?;

        let mut statuses = Writer::from_path(dir.join("statuses.csv"))?;
        statuses.write_record(STATUS_HEADER)?;

        Ok(Self { poses, statuses, finished: false })
    }
}

impl TraceWriter for CsvTraceWriter {
    fn write_poses(&mut self, rows: &[PoseRow]) -> OutputResult<()> {
        for row in rows {
            self.poses.write_record(&[
                row.tick.to_string(),
                row.agent.to_string(),
                format!("{:.4}", row.x),
                format!("{:.4}", row.y),
                format!("{:.4}", row.z),
                format!("{:.2}", row.yaw),
                (row.motion_done as u8).to_string(),
                row.collisions.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_status(&mut self, row: &StatusRow) -> OutputResult<()> {
        self.statuses.write_record(&[
            row.tick.to_string(),
            row.agent.to_string(),
            row.action.to_owned(),
            row.status.to_owned(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.poses.flush()?;
        self.statuses.flush()?;
        Ok(())
    }
}
