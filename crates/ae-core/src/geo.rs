//! Scene geometry: positions, rotations, and the yaw conventions used by
//! every motion action.
//!
//! Coordinates are left-handed with +Y up.  A yaw of 0° faces +Z and a yaw
//! of +90° faces +X, so positive angles turn the agent clockwise when seen
//! from above.  All angles crossing the public API are in degrees.

use std::ops::{Add, AddAssign, Mul, Neg, Sub};

// ── Vec3 ──────────────────────────────────────────────────────────────────────

/// A single-precision 3-D vector.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO:    Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };
    pub const UP:      Vec3 = Vec3 { x: 0.0, y: 1.0, z: 0.0 };
    pub const FORWARD: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 1.0 };

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    #[inline]
    pub fn distance(self, other: Vec3) -> f32 {
        (self - other).length()
    }

    /// Distance ignoring height.  Agents on uneven floors still compare equal.
    #[inline]
    pub fn planar_distance(self, other: Vec3) -> f32 {
        let dx = self.x - other.x;
        let dz = self.z - other.z;
        (dx * dx + dz * dz).sqrt()
    }

    /// Unit vector in the same direction, or `ZERO` for a zero-length input.
    pub fn normalized(self) -> Vec3 {
        let len = self.length();
        if len <= f32::EPSILON {
            Vec3::ZERO
        } else {
            self * (1.0 / len)
        }
    }

    /// Drop the vertical component.
    #[inline]
    pub fn flat(self) -> Vec3 {
        Vec3::new(self.x, 0.0, self.z)
    }

    /// Heading of this vector on the XZ plane, in degrees (0° = +Z).
    #[inline]
    pub fn yaw_degrees(self) -> f32 {
        self.x.atan2(self.z).to_degrees()
    }

    /// Unit forward vector for a yaw in degrees.
    #[inline]
    pub fn from_yaw(yaw_deg: f32) -> Vec3 {
        let r = yaw_deg.to_radians();
        Vec3::new(r.sin(), 0.0, r.cos())
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    #[inline]
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec3) {
        *self = *self + rhs;
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    #[inline]
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, s: f32) -> Vec3 {
        Vec3::new(self.x * s, self.y * s, self.z * s)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;
    #[inline]
    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

impl std::fmt::Display for Vec3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}

// ── Quat ──────────────────────────────────────────────────────────────────────

/// A unit quaternion rotation `(x, y, z, w)`.
///
/// Agents only ever rotate about +Y, but overlap requests forward the full
/// rotation to the backend, so the wire type stays general.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    pub const IDENTITY: Quat = Quat { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    /// Rotation of `yaw_deg` degrees about +Y.
    pub fn from_yaw(yaw_deg: f32) -> Quat {
        let half = yaw_deg.to_radians() * 0.5;
        Quat { x: 0.0, y: half.sin(), z: 0.0, w: half.cos() }
    }

    /// Heading (rotation about +Y) in degrees, in `(-180, 180]`.
    pub fn yaw_degrees(self) -> f32 {
        self.rotate(Vec3::FORWARD).yaw_degrees()
    }

    /// Rotate a vector by this quaternion.
    pub fn rotate(self, v: Vec3) -> Vec3 {
        // v' = v + 2w(q × v) + 2 q × (q × v)
        let q = Vec3::new(self.x, self.y, self.z);
        let t = cross(q, v) * 2.0;
        v + t * self.w + cross(q, t)
    }
}

#[inline]
fn cross(a: Vec3, b: Vec3) -> Vec3 {
    Vec3::new(
        a.y * b.z - a.z * b.y,
        a.z * b.x - a.x * b.z,
        a.x * b.y - a.y * b.x,
    )
}

// ── Angle helpers ─────────────────────────────────────────────────────────────

/// Wrap an angle in degrees into `(-180, 180]`.
pub fn wrap_degrees(angle: f32) -> f32 {
    let mut a = angle % 360.0;
    if a > 180.0 {
        a -= 360.0;
    } else if a <= -180.0 {
        a += 360.0;
    }
    a
}

/// Signed planar angle in degrees that turns `from` onto `to`.
///
/// Positive results are clockwise when seen from above.  Returns `0.0` when
/// either vector has no planar extent.
pub fn signed_angle(from: Vec3, to: Vec3) -> f32 {
    let (a, b) = (from.flat(), to.flat());
    if a.length() <= f32::EPSILON || b.length() <= f32::EPSILON {
        return 0.0;
    }
    wrap_degrees(b.yaw_degrees() - a.yaw_degrees())
}
