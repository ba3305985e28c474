//! Point and coordinate types shared by the grid, traversal and smoother.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// Grid coordinates (integer cell indices)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridCoord {
    /// X coordinate (column index)
    pub x: i32,
    /// Y coordinate (row index)
    pub y: i32,
}

impl GridCoord {
    /// Create a new grid coordinate
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another coordinate
    #[inline]
    pub fn manhattan_distance(&self, other: &GridCoord) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

impl Add for GridCoord {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        GridCoord::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for GridCoord {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        GridCoord::new(self.x - other.x, self.y - other.y)
    }
}

/// Point in the horizontal plane (world units, f32).
///
/// Also used for points expressed in cell space, where one unit is one node.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPoint {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl WorldPoint {
    /// Create a new world point
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Zero point (origin)
    pub const ZERO: WorldPoint = WorldPoint { x: 0.0, y: 0.0 };

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(&self, other: &WorldPoint) -> f32 {
        self.distance_squared(other).sqrt()
    }

    /// Squared distance (avoids sqrt)
    #[inline]
    pub fn distance_squared(&self, other: &WorldPoint) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Length (magnitude) of this point as a vector from origin
    #[inline]
    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Normalize to unit length; the zero vector is returned unchanged
    #[inline]
    pub fn normalize(&self) -> WorldPoint {
        let len = self.length();
        if len > 0.0 {
            WorldPoint::new(self.x / len, self.y / len)
        } else {
            *self
        }
    }

    /// Dot product with another point (as vectors)
    #[inline]
    pub fn dot(&self, other: &WorldPoint) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Cross product (z-component of 3D cross product)
    #[inline]
    pub fn cross(&self, other: &WorldPoint) -> f32 {
        self.x * other.y - self.y * other.x
    }

    /// True when both coordinates are finite
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for WorldPoint {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        WorldPoint::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for WorldPoint {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        WorldPoint::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f32> for WorldPoint {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f32) -> Self {
        WorldPoint::new(self.x * scalar, self.y * scalar)
    }
}

/// Path waypoint.
///
/// `x` and `y` span the horizontal plane the smoother works in. `z` is the
/// vertical coordinate; it is carried through untouched.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Waypoint {
    /// X coordinate (world units)
    pub x: f32,
    /// Y coordinate (world units)
    pub y: f32,
    /// Vertical coordinate (world units)
    pub z: f32,
}

impl Waypoint {
    /// Create a waypoint with an explicit vertical coordinate
    #[inline]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Create a waypoint on the z = 0 plane
    #[inline]
    pub fn planar(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Lift a plane point to a waypoint at height `z`
    #[inline]
    pub fn from_plane(point: WorldPoint, z: f32) -> Self {
        Self {
            x: point.x,
            y: point.y,
            z,
        }
    }

    /// Horizontal projection
    #[inline]
    pub fn plane(&self) -> WorldPoint {
        WorldPoint::new(self.x, self.y)
    }
}

impl From<WorldPoint> for Waypoint {
    fn from(point: WorldPoint) -> Self {
        Waypoint::from_plane(point, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_grid_coord_arithmetic() {
        let a = GridCoord::new(3, -2);
        let b = GridCoord::new(1, 4);

        assert_eq!(a + b, GridCoord::new(4, 2));
        assert_eq!(a - b, GridCoord::new(2, -6));
        assert_eq!(a.manhattan_distance(&b), 8);
    }

    #[test]
    fn test_world_point_vector_ops() {
        let a = WorldPoint::new(3.0, 4.0);
        let b = WorldPoint::new(1.0, 0.0);

        assert_relative_eq!(a.length(), 5.0);
        assert_relative_eq!(a.distance(&b), (4.0f32 + 16.0).sqrt());
        assert_relative_eq!(a.dot(&b), 3.0);
        assert_relative_eq!(b.cross(&a), 4.0);
        assert_relative_eq!(a.normalize().length(), 1.0, epsilon = 1e-6);
        assert_eq!(WorldPoint::ZERO.normalize(), WorldPoint::ZERO);
    }

    #[test]
    fn test_waypoint_plane_projection() {
        let w = Waypoint::new(1.5, 2.5, 7.0);
        assert_eq!(w.plane(), WorldPoint::new(1.5, 2.5));

        let lifted = Waypoint::from_plane(WorldPoint::new(4.0, 5.0), w.z);
        assert_eq!(lifted, Waypoint::new(4.0, 5.0, 7.0));
    }

    #[test]
    fn test_non_finite_detection() {
        assert!(WorldPoint::new(1.0, 2.0).is_finite());
        assert!(!WorldPoint::new(f32::NAN, 2.0).is_finite());
        assert!(!WorldPoint::new(1.0, f32::INFINITY).is_finite());
    }
}
