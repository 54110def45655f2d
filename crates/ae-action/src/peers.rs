//! Per-tick spatial index of agent positions.
//!
//! Built once per tick from telemetry and shared read-only by every agent's
//! navigation.  An R-tree (via `rstar`) on the floor plane keeps proximity
//! lookups cheap when many agents share a scene.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use ae_command::TickTelemetry;
use ae_core::{AgentId, Vec3};

#[derive(Clone, Debug)]
struct PeerEntry {
    point: [f32; 2], // [x, z]
    id:    AgentId,
}

impl RTreeObject for PeerEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for PeerEntry {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dz = self.point[1] - point[1];
        dx * dx + dz * dz
    }
}

#[inline]
fn planar(p: Vec3) -> [f32; 2] {
    [p.x, p.z]
}

/// Read-only snapshot of where every agent stood at the start of the tick.
#[derive(Debug, Default)]
pub struct PeerIndex {
    tree: RTree<PeerEntry>,
}

impl PeerIndex {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_positions(positions: impl IntoIterator<Item = (AgentId, Vec3)>) -> Self {
        let entries = positions
            .into_iter()
            .map(|(id, p)| PeerEntry { point: planar(p), id })
            .collect();
        Self { tree: RTree::bulk_load(entries) }
    }

    pub fn from_telemetry(telemetry: &TickTelemetry) -> Self {
        Self::from_positions(telemetry.agents.iter().map(|a| (a.agent, a.pose.position)))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Agents other than `me` strictly closer than `radius` to `center`,
    /// with their planar distance, nearest first.
    pub fn others_within(&self, me: AgentId, center: Vec3, radius: f32) -> Vec<(AgentId, f32)> {
        let c = planar(center);
        let mut found: Vec<(AgentId, f32)> = self
            .tree
            .locate_within_distance(c, radius * radius)
            .filter(|e| e.id != me)
            .map(|e| (e.id, e.distance_2(&c).sqrt()))
            .filter(|&(_, d)| d < radius)
            .collect();
        found.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
        found
    }
}
