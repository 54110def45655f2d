//! Plain data row types written by trace writers.

/// One agent's pose at the end of a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseRow {
    pub tick:        u64,
    pub agent:       u32,
    pub x:           f32,
    pub y:           f32,
    pub z:           f32,
    /// Degrees, clockwise from +Z.
    pub yaw:         f32,
    pub motion_done: bool,
    /// Collision events reported for this agent this tick.
    pub collisions:  u32,
}

/// An action status transition observed by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusRow {
    pub tick:   u64,
    pub agent:  u32,
    pub action: &'static str,
    pub status: &'static str,
}
