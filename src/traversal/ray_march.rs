//! Incremental voxel (DDA) ray marching.
//!
//! Walks a segment one cell boundary at a time:
//!
//! ```text
//! From (0.5, 0.5) to (3.5, 2.0):
//!
//!     2 │           ┌───┐
//!       │       ┌───┤ ● │
//!     1 │   ┌───┤ ● │ ● │
//!       ├───┤ ● │ ● └───┘
//!     0 │ ● │ ● │
//!       └───┴───┘
//!         0   1   2   3
//! ```
//!
//! For each axis the marcher keeps the ray parameter at which the next
//! boundary is crossed (`t_max`) and the parameter span of one whole cell
//! (`t_delta`). Every step advances the axis with the smaller `t_max`, so
//! exactly one cell is emitted per crossing and the walk takes
//! `manhattan(start_cell, end_cell)` steps.

use crate::core::{GridCoord, WorldPoint};
use crate::error::Result;
use crate::grid::GridFrame;

use super::{CellSegment, CellTraversal};

/// Baseline traversal: cost grows with segment length.
#[derive(Clone, Copy, Debug, Default)]
pub struct RayMarcher;

impl RayMarcher {
    /// Create a ray marcher
    pub fn new() -> Self {
        Self
    }
}

impl CellTraversal for RayMarcher {
    fn traverse(
        &self,
        start: WorldPoint,
        end: WorldPoint,
        frame: &GridFrame,
    ) -> Result<Vec<GridCoord>> {
        let segment = CellSegment::prepare(start, end, frame)?;
        Ok(march(&segment))
    }
}

/// Parametric distance to the first boundary and per-cell increment along
/// one axis. A zero delta never crosses a boundary.
#[inline]
fn axis_params(position: f32, delta: f32) -> (f32, f32) {
    if delta > 0.0 {
        ((position.floor() + 1.0 - position) / delta, 1.0 / delta)
    } else if delta < 0.0 {
        ((position - position.floor()) / -delta, 1.0 / -delta)
    } else {
        (f32::INFINITY, f32::INFINITY)
    }
}

fn march(segment: &CellSegment) -> Vec<GridCoord> {
    let start_cell = segment.start_cell();
    let end_cell = segment.end_cell();
    let delta = segment.end - segment.start;

    let step_x = (end_cell.x - start_cell.x).signum();
    let step_y = (end_cell.y - start_cell.y).signum();

    let (mut t_max_x, t_delta_x) = axis_params(segment.start.x, delta.x);
    let (mut t_max_y, t_delta_y) = axis_params(segment.start.y, delta.y);

    let steps = start_cell.manhattan_distance(&end_cell) as usize;
    let mut cells = Vec::with_capacity(steps + 1);
    let mut current = start_cell;
    cells.push(current);

    for _ in 0..steps {
        // An axis that already reached the end cell must not move again,
        // whatever rounding did to its t_max
        let advance_x = if current.x == end_cell.x {
            false
        } else if current.y == end_cell.y {
            true
        } else {
            t_max_x < t_max_y
        };

        if advance_x {
            current.x += step_x;
            t_max_x += t_delta_x;
        } else {
            current.y += step_y;
            t_max_y += t_delta_y;
        }
        cells.push(current);
    }

    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn cells(start: (f32, f32), end: (f32, f32)) -> Vec<GridCoord> {
        RayMarcher
            .traverse(
                WorldPoint::new(start.0, start.1),
                WorldPoint::new(end.0, end.1),
                &GridFrame::unit(),
            )
            .unwrap()
    }

    fn assert_connected(cells: &[GridCoord]) {
        for pair in cells.windows(2) {
            assert_eq!(pair[0].manhattan_distance(&pair[1]), 1, "gap in {:?}", cells);
        }
    }

    #[test]
    fn test_horizontal() {
        let result = cells((0.5, 0.5), (4.5, 0.5));

        assert_eq!(result.len(), 5);
        assert_eq!(result[0], GridCoord::new(0, 0));
        assert_eq!(result[4], GridCoord::new(4, 0));
    }

    #[test]
    fn test_vertical_uses_infinite_threshold() {
        let result = cells((2.5, 4.5), (2.5, 0.5));

        assert_eq!(result.len(), 5);
        assert!(result.iter().all(|c| c.x == 2));
    }

    #[test]
    fn test_diagonal_through_lattice_points() {
        let result = cells((0.5, 0.5), (3.5, 3.5));

        // Manhattan distance 6 -> 7 cells
        assert_eq!(result.len(), 7);
        assert_eq!(result[0], GridCoord::new(0, 0));
        assert_eq!(result[6], GridCoord::new(3, 3));
        assert!(result.contains(&GridCoord::new(1, 1)));
        assert!(result.contains(&GridCoord::new(2, 2)));
        assert_connected(&result);
    }

    #[test]
    fn test_shallow_slope() {
        let result = cells((0.5, 0.5), (6.0, 5.0));

        assert_eq!(
            result,
            vec![
                GridCoord::new(0, 0),
                GridCoord::new(1, 0),
                GridCoord::new(1, 1),
                GridCoord::new(2, 1),
                GridCoord::new(2, 2),
                GridCoord::new(3, 2),
                GridCoord::new(3, 3),
                GridCoord::new(4, 3),
                GridCoord::new(4, 4),
                GridCoord::new(5, 4),
            ]
        );
    }

    #[test]
    fn test_corner_endpoint_stays_on_near_side() {
        // Ends exactly on the lower-left corner of cell (5, 6)
        let result = cells((0.5, 0.5), (5.0, 6.0));

        assert_eq!(*result.last().unwrap(), GridCoord::new(4, 5));
        assert!(result.iter().all(|c| c.x <= 4));
        assert_connected(&result);
    }

    #[test]
    fn test_direction_independent() {
        let segments = [
            ((0.5, 0.5), (7.5, 2.5)),
            ((1.0, 4.0), (6.0, 1.0)),
            ((0.5, 0.5), (3.5, 3.5)),
            ((2.2, 7.9), (2.3, 0.1)),
        ];

        for (a, b) in segments {
            let forward: HashSet<_> = cells(a, b).into_iter().collect();
            let backward: HashSet<_> = cells(b, a).into_iter().collect();
            assert_eq!(forward, backward, "segment {:?} -> {:?}", a, b);
        }
    }

    #[test]
    fn test_step_count_is_manhattan_distance() {
        let segments = [
            ((0.3, 0.7), (9.2, 3.1)),
            ((8.9, 0.2), (0.4, 7.7)),
            ((4.5, 4.5), (4.6, 9.9)),
        ];

        for (a, b) in segments {
            let result = cells(a, b);
            let first = result[0];
            let last = *result.last().unwrap();
            assert_eq!(result.len() as i32, first.manhattan_distance(&last) + 1);
            assert_connected(&result);
        }
    }

    #[test]
    fn test_degenerate_segment() {
        let result = cells((3.2, 1.7), (3.2, 1.7));
        assert_eq!(result, vec![GridCoord::new(3, 1)]);
    }
}
