//! Cell corners and signed turn angles.

use crate::core::{GridCoord, WorldPoint};
use crate::grid::GridFrame;

/// Angles smaller than this (degrees) are treated as exactly zero.
pub const ANGLE_EPSILON: f32 = 0.01;

/// Number of corners of a cell.
pub const CORNER_COUNT: usize = 4;

/// Corner offsets from the cell center in half-node units.
///
/// Winding: (+x,+y), (+x,-y), (-x,-y), (-x,+y). Opposite corners differ by 2
/// in index.
const CORNER_OFFSETS: [(f32, f32); CORNER_COUNT] =
    [(0.5, 0.5), (0.5, -0.5), (-0.5, -0.5), (-0.5, 0.5)];

/// Discrete left/right/straight classification of three points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TurnSign {
    /// Clockwise
    Right,
    /// Collinear within [`ANGLE_EPSILON`]
    #[default]
    Straight,
    /// Counter-clockwise
    Left,
}

impl TurnSign {
    /// Classify a signed angle in degrees
    #[inline]
    pub fn from_angle(angle: f32) -> Self {
        if angle.abs() < ANGLE_EPSILON {
            TurnSign::Straight
        } else if angle > 0.0 {
            TurnSign::Left
        } else {
            TurnSign::Right
        }
    }

    /// -1, 0 or +1
    #[inline]
    pub fn as_i8(self) -> i8 {
        match self {
            TurnSign::Right => -1,
            TurnSign::Straight => 0,
            TurnSign::Left => 1,
        }
    }
}

/// World position of corner `k` of a cell.
///
/// `k` is taken modulo [`CORNER_COUNT`].
#[inline]
pub fn cell_corner(cell: GridCoord, k: usize, frame: &GridFrame) -> WorldPoint {
    let (ox, oy) = CORNER_OFFSETS[k % CORNER_COUNT];
    frame.to_world(WorldPoint::new(
        cell.x as f32 + 0.5 + ox,
        cell.y as f32 + 0.5 + oy,
    ))
}

/// All four corners of a cell in winding order
#[inline]
pub fn cell_corners(cell: GridCoord, frame: &GridFrame) -> [WorldPoint; CORNER_COUNT] {
    std::array::from_fn(|k| cell_corner(cell, k, frame))
}

/// Signed angle in degrees rotating `from` onto `to`, counter-clockwise
/// positive. Zero-length vectors give 0.
#[inline]
pub fn signed_angle(from: WorldPoint, to: WorldPoint) -> f32 {
    from.cross(&to).atan2(from.dot(&to)).to_degrees()
}

/// Signed angle (degrees) from `middle - start` to `end - start`.
///
/// Magnitudes below [`ANGLE_EPSILON`] come back as exactly `0.0` so that
/// near-collinear points do not flip sign on rounding noise.
#[inline]
pub fn signed_turn_angle(start: WorldPoint, middle: WorldPoint, end: WorldPoint) -> f32 {
    let angle = signed_angle(middle - start, end - start);
    if angle.abs() < ANGLE_EPSILON {
        0.0
    } else {
        angle
    }
}

/// Turn classification of `start -> middle` versus `start -> end`
#[inline]
pub fn turn_sign(start: WorldPoint, middle: WorldPoint, end: WorldPoint) -> TurnSign {
    TurnSign::from_angle(signed_turn_angle(start, middle, end))
}

/// Signed angle from direction `end - start` to each corner of `cell`, seen
/// from `start`. Index matches [`cell_corner`].
pub fn corner_angles(
    cell: GridCoord,
    start: WorldPoint,
    end: WorldPoint,
    frame: &GridFrame,
) -> [f32; CORNER_COUNT] {
    std::array::from_fn(|k| signed_turn_angle(start, end, cell_corner(cell, k, frame)))
}
