//! Path planning trait and the two bundled planners.
//!
//! # Pluggability
//!
//! The backend answers `RequestPath` through the [`Planner`] trait, so a
//! test can swap in a planner with known waypoints without touching the
//! physics.
//!
//! | Planner               | Waypoints                                        |
//! |-----------------------|--------------------------------------------------|
//! | [`StraightLinePlanner`] | `[origin, destination]`                        |
//! | [`GridPlanner`]       | Dijkstra over an 8-connected occupancy grid      |
//!
//! # Cost units
//!
//! Grid costs are integer millimetres (a straight step of a 0.25 m cell
//! costs 250, a diagonal step 354), which keeps the priority queue on
//! `u32` keys.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ae_command::PathState;
use ae_core::Vec3;

use crate::Scene;

// ── Route ─────────────────────────────────────────────────────────────────────

/// A planner's answer: completion code plus waypoints.  `waypoints[0]` is
/// the origin.
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    pub state:     PathState,
    pub waypoints: Vec<Vec3>,
}

impl Route {
    pub fn complete(waypoints: Vec<Vec3>) -> Self {
        Self { state: PathState::Complete, waypoints }
    }

    pub fn invalid() -> Self {
        Self { state: PathState::Invalid, waypoints: Vec::new() }
    }
}

// ── Planner trait ─────────────────────────────────────────────────────────────

pub trait Planner {
    /// Plan from `origin` to `destination` through `scene`.
    ///
    /// Unreachable or blocked destinations return a non-complete route
    /// rather than an error: failing to find a path is data for the
    /// navigation action.
    fn plan(&self, scene: &Scene, origin: Vec3, destination: Vec3) -> Route;
}

// ── StraightLinePlanner ───────────────────────────────────────────────────────

/// Straight line to any destination that is inside the room and not inside
/// an obstacle.  Obstacles in between are not considered.
#[derive(Copy, Clone, Debug, Default)]
pub struct StraightLinePlanner;

impl Planner for StraightLinePlanner {
    fn plan(&self, scene: &Scene, origin: Vec3, destination: Vec3) -> Route {
        if scene.is_blocked(destination, 0.0) {
            return Route::invalid();
        }
        Route::complete(vec![origin, destination])
    }
}

// ── GridPlanner ───────────────────────────────────────────────────────────────

/// Dijkstra over a uniform grid laid on the room floor.
///
/// A cell is free when a disc of `clearance` around its centre touches
/// neither a wall nor a solid obstacle.  The returned path starts at the
/// exact origin, passes through the centres of the cells where the grid path
/// changes direction, and ends at the exact destination.
#[derive(Copy, Clone, Debug)]
pub struct GridPlanner {
    /// Cell edge length, metres.
    pub cell:      f32,
    /// Body radius plus safety margin, metres.
    pub clearance: f32,
}

impl Default for GridPlanner {
    fn default() -> Self {
        Self { cell: 0.25, clearance: 0.4 }
    }
}

/// Cell grid geometry for one planning call.
struct Grid {
    cell:  f32,
    min_x: f32,
    min_z: f32,
    cols:  usize,
    rows:  usize,
}

impl Grid {
    fn new(scene: &Scene, cell: f32) -> Self {
        let room = scene.room();
        Self {
            cell,
            min_x: -room.half_width,
            min_z: -room.half_depth,
            cols:  ((2.0 * room.half_width) / cell).ceil().max(1.0) as usize,
            rows:  ((2.0 * room.half_depth) / cell).ceil().max(1.0) as usize,
        }
    }

    fn index_of(&self, p: Vec3) -> Option<usize> {
        let c = ((p.x - self.min_x) / self.cell).floor();
        let r = ((p.z - self.min_z) / self.cell).floor();
        if c < 0.0 || r < 0.0 || c as usize >= self.cols || r as usize >= self.rows {
            return None;
        }
        Some(r as usize * self.cols + c as usize)
    }

    fn center(&self, index: usize) -> Vec3 {
        let (r, c) = (index / self.cols, index % self.cols);
        Vec3::new(
            self.min_x + (c as f32 + 0.5) * self.cell,
            0.0,
            self.min_z + (r as f32 + 0.5) * self.cell,
        )
    }

    /// In-bounds neighbours with their step direction `(dc, dr)`.
    fn neighbours(&self, index: usize) -> impl Iterator<Item = (usize, (i32, i32))> + '_ {
        let (r, c) = ((index / self.cols) as i32, (index % self.cols) as i32);
        const STEPS: [(i32, i32); 8] = [(1, 0), (-1, 0), (0, 1), (0, -1), (1, 1), (1, -1), (-1, 1), (-1, -1)];
        STEPS.into_iter().filter_map(move |(dc, dr)| {
            let (nc, nr) = (c + dc, r + dr);
            if nc < 0 || nr < 0 || nc as usize >= self.cols || nr as usize >= self.rows {
                return None;
            }
            Some((nr as usize * self.cols + nc as usize, (dc, dr)))
        })
    }
}

impl Planner for GridPlanner {
    fn plan(&self, scene: &Scene, origin: Vec3, destination: Vec3) -> Route {
        if scene.is_blocked(destination, self.clearance) {
            return Route::invalid();
        }
        let grid = Grid::new(scene, self.cell);
        let (Some(start), Some(goal)) = (grid.index_of(origin), grid.index_of(destination)) else {
            return Route::invalid();
        };

        let straight = (self.cell * 1000.0).round() as u32;
        let diagonal = (self.cell * 1000.0 * std::f32::consts::SQRT_2).round() as u32;

        // The start cell is always enterable: an agent may stand close to a
        // wall or obstacle.
        let free = |i: usize| i == start || !scene.is_blocked(grid.center(i), self.clearance);

        let n = grid.cols * grid.rows;
        let mut dist = vec![u32::MAX; n];
        let mut prev = vec![usize::MAX; n];
        let mut heap = BinaryHeap::new();
        dist[start] = 0;
        heap.push(Reverse((0u32, start)));

        while let Some(Reverse((cost, cell))) = heap.pop() {
            if cell == goal {
                break;
            }
            if cost > dist[cell] {
                continue;
            }
            for (next, (dc, dr)) in grid.neighbours(cell) {
                if !free(next) {
                    continue;
                }
                let step = if dc != 0 && dr != 0 { diagonal } else { straight };
                let new_cost = cost.saturating_add(step);
                if new_cost < dist[next] {
                    dist[next] = new_cost;
                    prev[next] = cell;
                    heap.push(Reverse((new_cost, next)));
                }
            }
        }

        if dist[goal] == u32::MAX {
            return Route::invalid();
        }

        // ── Reconstruct and keep only the turning cells ───────────────────
        let mut cells = vec![goal];
        let mut cur = goal;
        while cur != start {
            cur = prev[cur];
            cells.push(cur);
        }
        cells.reverse();

        let mut waypoints = vec![origin];
        for w in cells.windows(3) {
            let d1 = w[1] as i64 - w[0] as i64;
            let d2 = w[2] as i64 - w[1] as i64;
            if d1 != d2 {
                waypoints.push(grid.center(w[1]));
            }
        }
        waypoints.push(destination);
        Route::complete(waypoints)
    }
}
