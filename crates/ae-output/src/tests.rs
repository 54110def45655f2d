//! Tests for ae-output.

use std::path::Path;

use tempfile::TempDir;

use crate::*;

fn tmp() -> TempDir {
    tempfile::tempdir().expect("create temp dir")
}

fn records(path: &Path) -> Vec<::csv::StringRecord> {
    let mut rdr = ::csv::Reader::from_path(path).unwrap();
    rdr.records().map(|r| r.unwrap()).collect()
}

fn pose_row(agent: u32, tick: u64) -> PoseRow {
    PoseRow { tick, agent, x: 1.0, y: 0.0, z: -2.5, yaw: 90.0, motion_done: true, collisions: 0 }
}

#[cfg(test)]
mod csv_tests {
    use super::*;

    #[test]
    fn csv_files_created_with_headers() {
        let dir = tmp();
        let mut w = CsvTraceWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = ::csv::Reader::from_path(dir.path().join("poses.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, crate::csv::POSE_HEADER);

        let mut rdr = ::csv::Reader::from_path(dir.path().join("statuses.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, crate::csv::STATUS_HEADER);
    }

    #[test]
    fn pose_rows_written_in_order() {
        let dir = tmp();
        let mut w = CsvTraceWriter::new(dir.path()).unwrap();
        w.write_poses(&[pose_row(3, 5), pose_row(7, 5)]).unwrap();
        w.finish().unwrap();

        let rows = records(&dir.path().join("poses.csv"));
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][1], "3");
        assert_eq!(&rows[1][1], "7");
        assert_eq!(&rows[0][4], "-2.5000");
        assert_eq!(&rows[0][6], "1");
    }

    #[test]
    fn status_row_written() {
        let dir = tmp();
        let mut w = CsvTraceWriter::new(dir.path()).unwrap();
        w.write_status(&StatusRow { tick: 12, agent: 3, action: "navigate", status: "success" }).unwrap();
        w.finish().unwrap();

        let rows = records(&dir.path().join("statuses.csv"));
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "12");
        assert_eq!(&rows[0][2], "navigate");
        assert_eq!(&rows[0][3], "success");
    }

    #[test]
    fn finish_is_idempotent() {
        let dir = tmp();
        let mut w = CsvTraceWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tmp();
        let result = CsvTraceWriter::new(&dir.path().join("nope"));
        assert!(result.is_err());
    }
}

#[cfg(test)]
mod observer_tests {
    use ae_action::{ActionStatus, ActionTag};
    use ae_agent::AgentStaticBuilder;
    use ae_command::Pose;
    use ae_core::{AgentId, EngineConfig, Locomotion, Tick, Vec3};
    use ae_kinematic::{KinematicBackendBuilder, KinematicConfig};
    use ae_sim::{SessionBuilder, SessionObserver};

    use super::*;

    /// Fails every write after the first `ok` calls.
    struct Flaky {
        ok:    usize,
        calls:  usize,
    }

    impl TraceWriter for Flaky {
        fn write_poses(&mut self, _rows: &[PoseRow]) -> OutputResult<()> {
            self.calls += 1;
            if self.calls > self.ok {
                return Err(std::io::Error::other("disk full").into());
            }
            Ok(())
        }

        fn write_status(&mut self, _row: &StatusRow) -> OutputResult<()> {
            self.write_poses(&[])
        }

        fn finish(&mut self) -> OutputResult<()> {
            Ok(())
        }
    }

    #[test]
    fn session_trace_has_poses_and_terminal_status() {
        let dir = tmp();
        let walker = AgentStaticBuilder::new(AgentId(1), Locomotion::Legged).build();
        let backend = KinematicBackendBuilder::new(KinematicConfig::default())
            .agent(&walker, Pose::new(Vec3::ZERO, 0.0))
            .build()
            .unwrap();
        let mut session = SessionBuilder::new(EngineConfig::default(), backend).agent(walker).build().unwrap();
        session.orchestrator_mut(AgentId(1)).unwrap().move_by(1.0);

        let mut obs = TraceObserver::new(CsvTraceWriter::new(dir.path()).unwrap());
        let ticks = session.run_until_idle(100, &mut obs).unwrap();
        assert!(obs.take_error().is_none());

        let poses = records(&dir.path().join("poses.csv"));
        assert_eq!(poses.len() as u64, ticks);
        let last_z: f32 = poses[poses.len() - 1][4].parse().unwrap();
        assert!((last_z - 1.0).abs() <= 0.1);

        let statuses = records(&dir.path().join("statuses.csv"));
        assert_eq!(statuses.len(), 1);
        assert_eq!(&statuses[0][2], ActionTag::MoveBy.as_str());
        assert_eq!(&statuses[0][3], ActionStatus::Success.as_str());
    }

    #[test]
    fn first_error_kept_and_later_writes_skipped() {
        let mut obs = TraceObserver::new(Flaky { ok: 1, calls: 0 });
        for t in 0..3 {
            obs.on_status_change(Tick(t), AgentId(1), ActionTag::TurnBy, ActionStatus::Success);
        }
        assert!(matches!(obs.take_error(), Some(OutputError::Io(_))));
        assert!(obs.take_error().is_none());
        assert_eq!(obs.into_writer().calls, 2);
    }
}
