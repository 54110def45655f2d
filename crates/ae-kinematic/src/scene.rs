//! Static scene geometry: the walled room, scene objects, and the overlap
//! box test.
//!
//! # Spatial index
//!
//! Solid objects never move, so they are bulk-loaded once into an R-tree
//! (via `rstar`) keyed by their `[x, z]` floor position.  Disc queries ask
//! the tree for candidates within `radius + max_obstacle_radius` and then
//! apply the exact disc test.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use ae_core::{ObjectId, Vec3};

// ── Room ──────────────────────────────────────────────────────────────────────

/// An axis-aligned room centred on the origin.  Everything outside it is
/// wall.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Room {
    pub half_width: f32,
    pub half_depth: f32,
}

impl Room {
    pub fn new(half_width: f32, half_depth: f32) -> Self {
        Self { half_width, half_depth }
    }

    /// `true` if a disc of `margin` radius around `p` fits inside the walls.
    #[inline]
    pub fn contains(&self, p: Vec3, margin: f32) -> bool {
        p.x.abs() + margin <= self.half_width && p.z.abs() + margin <= self.half_depth
    }
}

// ── SceneObject ───────────────────────────────────────────────────────────────

/// Radius given to props created with [`SceneObject::prop`].
const PROP_RADIUS: f32 = 0.05;

/// A scene object, modelled as a disc on the floor plane.
///
/// Solid objects block bodies and never move.  Props do not block; they
/// can be grasped, carried, and dropped.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SceneObject {
    pub id:       ObjectId,
    pub position: Vec3,
    pub radius:   f32,
    pub solid:    bool,
}

impl SceneObject {
    pub fn obstacle(id: ObjectId, position: Vec3, radius: f32) -> Self {
        Self { id, position, radius, solid: true }
    }

    pub fn prop(id: ObjectId, position: Vec3) -> Self {
        Self { id, position, radius: PROP_RADIUS, solid: false }
    }
}

// ── R-tree obstacle entry ─────────────────────────────────────────────────────

#[derive(Clone)]
struct ObstacleEntry {
    point:  [f32; 2],
    id:     ObjectId,
    radius: f32,
}

impl RTreeObject for ObstacleEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for ObstacleEntry {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dz = self.point[1] - point[1];
        dx * dx + dz * dz
    }
}

// ── Scene ─────────────────────────────────────────────────────────────────────

/// The room plus an index of its solid obstacles.
pub struct Scene {
    room:       Room,
    solids:     RTree<ObstacleEntry>,
    max_radius: f32,
}

impl Scene {
    /// Index the solid objects of `objects`; props are ignored.
    pub fn new(room: Room, objects: &[SceneObject]) -> Self {
        let entries: Vec<ObstacleEntry> = objects
            .iter()
            .filter(|o| o.solid)
            .map(|o| ObstacleEntry { point: [o.position.x, o.position.z], id: o.id, radius: o.radius })
            .collect();
        let max_radius = entries.iter().map(|e| e.radius).fold(0.0, f32::max);
        Self { room, solids: RTree::bulk_load(entries), max_radius }
    }

    #[inline]
    pub fn room(&self) -> Room {
        self.room
    }

    /// Number of solid obstacles.
    pub fn obstacle_count(&self) -> usize {
        self.solids.size()
    }

    /// Solid obstacles that a disc of `radius` at `p` penetrates, nearest
    /// first.
    pub fn solids_touching(&self, p: Vec3, radius: f32) -> Vec<ObjectId> {
        let reach = radius + self.max_radius;
        let mut hits: Vec<(f32, ObjectId)> = self
            .solids
            .locate_within_distance([p.x, p.z], reach * reach)
            .filter_map(|e| {
                let d = e.distance_2(&[p.x, p.z]).sqrt();
                (d < radius + e.radius).then_some((d, e.id))
            })
            .collect();
        hits.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        hits.into_iter().map(|(_, id)| id).collect()
    }

    /// `true` if a disc of `clearance` at `p` leaves the room or touches an
    /// obstacle.
    pub fn is_blocked(&self, p: Vec3, clearance: f32) -> bool {
        !self.room.contains(p, clearance) || !self.solids_touching(p, clearance).is_empty()
    }
}

// ── OverlapBox ────────────────────────────────────────────────────────────────

/// An overlap query shape: a box rotated about +Y.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OverlapBox {
    pub center: Vec3,
    pub half:   Vec3,
    right:      Vec3,
    forward:    Vec3,
}

impl OverlapBox {
    pub fn new(center: Vec3, half: Vec3, yaw_deg: f32) -> Self {
        Self {
            center,
            half,
            right:   Vec3::from_yaw(yaw_deg + 90.0),
            forward: Vec3::from_yaw(yaw_deg),
        }
    }

    /// The four floor-plane corners.
    pub fn corners(&self) -> [Vec3; 4] {
        let r = self.right * self.half.x;
        let f = self.forward * self.half.z;
        let c = self.center;
        [c + r + f, c + r - f, c - r + f, c - r - f]
    }

    /// `true` if the box reaches past the room's walls.
    pub fn hits_walls(&self, room: Room) -> bool {
        self.corners().iter().any(|&c| !room.contains(c, 0.0))
    }

    /// `true` if the box intersects a vertical disc of `radius` at `p`.
    ///
    /// Height only has to fall within the box's vertical span (padded by
    /// the radius); the floor-plane test is exact.
    pub fn hits_disc(&self, p: Vec3, radius: f32) -> bool {
        if (p.y - self.center.y).abs() > self.half.y + radius {
            return false;
        }
        let d = p - self.center;
        let dx = (d.dot(self.right).abs() - self.half.x).max(0.0);
        let dz = (d.dot(self.forward).abs() - self.half.z).max(0.0);
        dx * dx + dz * dz < radius * radius
    }
}
