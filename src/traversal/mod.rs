//! Grid cell traversal.
//!
//! Enumerates the cells a straight segment between two world points passes
//! through. Two interchangeable strategies implement [`CellTraversal`]:
//!
//! | Strategy | Cost per query | Notes |
//! |----------|----------------|-------|
//! | [`RayMarcher`] | O(segment length) | Exact voxel walk, one cell per boundary crossing |
//! | [`PatternTable`] | O(pattern size), no geometry | Precomputed band, superset of every segment between the two end cells |
//!
//! Both strategies order the endpoints canonically before working, so the
//! cell set of `a -> b` equals the cell set of `b -> a`, and both nudge the
//! endpoints inward by [`ENDPOINT_NUDGE`] cells so a segment that ends exactly
//! on a cell corner does not pick up the cells on the far side of it.
//!
//! Returned cells are not filtered; the caller decides which are blocked.

mod pattern;
mod ray_march;
mod strategy;

pub use pattern::{
    DEFAULT_PRECISION, DisplacementClass, PatternTable, PatternTableCache, SelectionPattern,
    pattern_count, pattern_index,
};
pub use ray_march::RayMarcher;
pub use strategy::{Traversal, TraversalStrategy};

use crate::core::{GridCoord, WorldPoint};
use crate::error::{Result, TantuError};
use crate::grid::GridFrame;

/// Inward nudge applied to both segment endpoints (cell units).
pub const ENDPOINT_NUDGE: f32 = 0.01;

/// Segments shorter than this (cell units) collapse to their start cell.
const DEGENERATE_LENGTH: f32 = 1e-6;

/// Strategy for enumerating the cells a segment crosses.
pub trait CellTraversal {
    /// Cells crossed by the segment `start -> end` (world units).
    ///
    /// The order is deterministic but carries no meaning; it may contain
    /// cells outside the grid.
    fn traverse(&self, start: WorldPoint, end: WorldPoint, frame: &GridFrame)
    -> Result<Vec<GridCoord>>;
}

impl<T: CellTraversal + ?Sized> CellTraversal for &T {
    fn traverse(
        &self,
        start: WorldPoint,
        end: WorldPoint,
        frame: &GridFrame,
    ) -> Result<Vec<GridCoord>> {
        (**self).traverse(start, end, frame)
    }
}

/// Segment in cell space with ordered, nudged endpoints.
#[derive(Clone, Copy, Debug)]
pub(crate) struct CellSegment {
    pub start: WorldPoint,
    pub end: WorldPoint,
}

impl CellSegment {
    /// Convert a world segment to cell space, order its endpoints and nudge
    /// them inward.
    pub fn prepare(start: WorldPoint, end: WorldPoint, frame: &GridFrame) -> Result<Self> {
        let mut a = frame.to_cell_space(start);
        let mut b = frame.to_cell_space(end);

        for (world, cell_space) in [(start, a), (end, b)] {
            if !cell_space.is_finite() {
                return Err(TantuError::NonFiniteCoordinate {
                    x: world.x,
                    y: world.y,
                });
            }
        }

        if (b.x, b.y) < (a.x, a.y) {
            std::mem::swap(&mut a, &mut b);
        }

        let delta = b - a;
        let length = delta.length();
        if length < DEGENERATE_LENGTH {
            return Ok(Self { start: a, end: a });
        }

        let guard = ENDPOINT_NUDGE.min(length * 0.25);
        let direction = delta * (1.0 / length);
        Ok(Self {
            start: a + direction * guard,
            end: b - direction * guard,
        })
    }

    /// Cell containing the nudged start point
    #[inline]
    pub fn start_cell(&self) -> GridCoord {
        GridCoord::new(self.start.x.floor() as i32, self.start.y.floor() as i32)
    }

    /// Cell containing the nudged end point
    #[inline]
    pub fn end_cell(&self) -> GridCoord {
        GridCoord::new(self.end.x.floor() as i32, self.end.y.floor() as i32)
    }
}
