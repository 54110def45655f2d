//! crossing — two agents walk across each other's path in an empty room.
//!
//! Agent 3 heads east, agent 7 heads north; their straight-line paths meet
//! at the origin.  The lower id backs off and re-plans when the two get
//! close, so both arrive without touching.
//!
//! ```text
//! cargo run -p crossing -- [config.json]
//! RUST_LOG=debug cargo run -p crossing
//! ```
//!
//! The optional JSON file may override any subset of:
//!
//! ```json
//! { "engine": { "yield_distance": 2.0 },
//!   "world":  { "noise": 0.05, "seed": 7 },
//!   "obstacles": [ { "id": 1, "position": { "x": 2, "y": 0, "z": 2 }, "radius": 0.4, "solid": true } ],
//!   "wheelchair": false,
//!   "max_ticks": 3000,
//!   "output_dir": "output/crossing" }
//! ```

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ae_action::ActionStatus;
use ae_agent::AgentStaticBuilder;
use ae_command::Pose;
use ae_core::{AgentId, EngineConfig, Locomotion, Vec3};
use ae_kinematic::{GridPlanner, KinematicBackendBuilder, KinematicConfig, SceneObject};
use ae_output::{CsvTraceWriter, TraceObserver};
use ae_sim::SessionBuilder;

// ── Configuration ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(default)]
struct DemoConfig {
    engine:     EngineConfig,
    world:      KinematicConfig,
    obstacles:  Vec<SceneObject>,
    wheelchair: bool,
    max_ticks:  u64,
    output_dir: PathBuf,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            engine:     EngineConfig::default(),
            world:      KinematicConfig::default(),
            obstacles:  Vec::new(),
            wheelchair: false,
            max_ticks:  3_000,
            output_dir: PathBuf::from("output/crossing"),
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<DemoConfig> {
    let Some(path) = path else {
        return Ok(DemoConfig::default());
    };
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

// ── Agents ────────────────────────────────────────────────────────────────────

struct Walker {
    id:    AgentId,
    start: Vec3,
    goal:  Vec3,
}

const WALKERS: [Walker; 2] = [
    Walker { id: AgentId(3), start: Vec3::new(-4.0, 0.0, 0.0), goal: Vec3::new(4.0, 0.0, 0.0) },
    Walker { id: AgentId(7), start: Vec3::new(0.0, 0.0, -4.0), goal: Vec3::new(0.0, 0.0, 4.0) },
];

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let arg = std::env::args().nth(1).map(PathBuf::from);
    let config = load_config(arg.as_deref())?;
    let locomotion = if config.wheelchair { Locomotion::Wheelchair } else { Locomotion::Legged };

    // 1. World.
    let agents: Vec<_> = WALKERS.iter().map(|w| AgentStaticBuilder::new(w.id, locomotion).build()).collect();
    let backend = WALKERS
        .iter()
        .zip(&agents)
        .fold(KinematicBackendBuilder::new(config.world.clone()), |b, (w, a)| {
            b.agent(a, Pose::new(w.start, 0.0))
        })
        .objects(config.obstacles.iter().copied())
        .planner(GridPlanner::default())
        .build()?;
    info!(agents = agents.len(), obstacles = config.obstacles.len(), "world ready");

    // 2. Session.
    let mut session = agents
        .into_iter()
        .fold(SessionBuilder::new(config.engine.clone(), backend), |b, a| b.agent(a))
        .build()?;
    for w in &WALKERS {
        if let Some(o) = session.orchestrator_mut(w.id) {
            o.navigate_to(w.goal);
        }
    }

    // 3. Trace output.
    std::fs::create_dir_all(&config.output_dir)?;
    let mut obs = TraceObserver::new(CsvTraceWriter::new(&config.output_dir)?);

    // 4. Run.
    let t0 = Instant::now();
    let ticks = session.run_until_idle(config.max_ticks, &mut obs)?;
    let elapsed = t0.elapsed();
    if let Some(e) = obs.take_error() {
        eprintln!("trace error: {e}");
    }

    // 5. Summary.
    println!("Crossing finished after {ticks} ticks ({:.3} s wall)", elapsed.as_secs_f64());
    println!("Trace written to {}", config.output_dir.display());
    println!();
    println!("{:<8} {:<10} {:<20} {:<8}", "Agent", "Yields", "Status", "Error");
    println!("{}", "-".repeat(48));
    for w in &WALKERS {
        let Some(o) = session.orchestrator(w.id) else {
            continue;
        };
        let yields = match o.action().map(|a| a.kind()) {
            Some(ae_action::ActionKind::Navigate(n)) => n.yields(),
            _ => 0,
        };
        let error = session
            .backend()
            .agent_pose(w.id)
            .map(|p| p.position.distance(w.goal))
            .unwrap_or(f32::NAN);
        println!("{:<8} {:<10} {:<20} {:<8.3}", w.id.0, yields, o.status().as_str(), error);
    }

    let failed = WALKERS.iter().filter(|w| session.status(w.id) != Some(ActionStatus::Success)).count();
    if failed > 0 {
        anyhow::bail!("{failed} agent(s) did not arrive");
    }
    Ok(())
}
