//! The grid abstraction consumed by traversal and smoothing.

use crate::core::{GridCoord, WorldPoint};

/// Placement of a grid in the world: where cell (0, 0) starts and how large
/// one node is.
///
/// Cell `(x, y)` covers `[origin + x * node_size, origin + (x + 1) * node_size)`
/// on each axis. "Cell space" is the same plane scaled so one node is one
/// unit and the origin sits at the lower-left corner of cell (0, 0).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridFrame {
    /// World position of the lower-left corner of cell (0, 0)
    pub origin: WorldPoint,
    /// Node edge length in world units
    pub node_size: f32,
}

impl GridFrame {
    /// Create a frame
    #[inline]
    pub fn new(origin: WorldPoint, node_size: f32) -> Self {
        Self { origin, node_size }
    }

    /// Frame with unit nodes anchored at the world origin
    #[inline]
    pub fn unit() -> Self {
        Self::new(WorldPoint::ZERO, 1.0)
    }

    /// Convert a world point to cell space
    #[inline]
    pub fn to_cell_space(&self, point: WorldPoint) -> WorldPoint {
        (point - self.origin) * (1.0 / self.node_size)
    }

    /// Convert a cell-space point back to world units
    #[inline]
    pub fn to_world(&self, cell_point: WorldPoint) -> WorldPoint {
        cell_point * self.node_size + self.origin
    }

    /// Cell containing a world point
    #[inline]
    pub fn cell_of(&self, point: WorldPoint) -> GridCoord {
        let p = self.to_cell_space(point);
        GridCoord::new(p.x.floor() as i32, p.y.floor() as i32)
    }

    /// World coordinates of a cell center
    #[inline]
    pub fn cell_center(&self, coord: GridCoord) -> WorldPoint {
        self.to_world(WorldPoint::new(coord.x as f32 + 0.5, coord.y as f32 + 0.5))
    }
}

impl Default for GridFrame {
    fn default() -> Self {
        Self::unit()
    }
}

/// Read-only walkability grid.
///
/// Implementations must report every coordinate outside
/// `[0, width) x [0, height)` as not walkable.
pub trait WalkableGrid {
    /// Grid width in cells
    fn width(&self) -> usize;

    /// Grid height in cells
    fn height(&self) -> usize;

    /// Node edge length in world units
    fn node_size(&self) -> f32;

    /// World position of the lower-left corner of cell (0, 0)
    fn origin(&self) -> WorldPoint {
        WorldPoint::ZERO
    }

    /// Is this cell walkable? Out-of-range cells are not.
    fn is_walkable(&self, coord: GridCoord) -> bool;

    /// Is this cell blocked (non-walkable or out of range)?
    #[inline]
    fn is_blocked(&self, coord: GridCoord) -> bool {
        !self.is_walkable(coord)
    }

    /// World placement of the grid
    #[inline]
    fn frame(&self) -> GridFrame {
        GridFrame::new(self.origin(), self.node_size())
    }

    /// Larger of width and height; the width a pattern table must cover
    #[inline]
    fn extent(&self) -> usize {
        self.width().max(self.height())
    }
}

impl<G: WalkableGrid + ?Sized> WalkableGrid for &G {
    fn width(&self) -> usize {
        (**self).width()
    }

    fn height(&self) -> usize {
        (**self).height()
    }

    fn node_size(&self) -> f32 {
        (**self).node_size()
    }

    fn origin(&self) -> WorldPoint {
        (**self).origin()
    }

    fn is_walkable(&self, coord: GridCoord) -> bool {
        (**self).is_walkable(coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_frame_round_trip() {
        let frame = GridFrame::new(WorldPoint::new(-2.0, 1.0), 0.5);
        let world = WorldPoint::new(0.75, 2.25);

        let cell_space = frame.to_cell_space(world);
        assert_relative_eq!(cell_space.x, 5.5);
        assert_relative_eq!(cell_space.y, 2.5);

        let back = frame.to_world(cell_space);
        assert_relative_eq!(back.x, world.x);
        assert_relative_eq!(back.y, world.y);
    }

    #[test]
    fn test_cell_of_and_center() {
        let frame = GridFrame::new(WorldPoint::ZERO, 2.0);

        assert_eq!(frame.cell_of(WorldPoint::new(3.9, 0.1)), GridCoord::new(1, 0));
        assert_eq!(frame.cell_of(WorldPoint::new(-0.1, 4.0)), GridCoord::new(-1, 2));

        let center = frame.cell_center(GridCoord::new(1, 2));
        assert_relative_eq!(center.x, 3.0);
        assert_relative_eq!(center.y, 5.0);
    }
}
