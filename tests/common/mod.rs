//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;

use rand::prelude::*;
use tantu::{
    CellTraversal, GridCoord, PathSmoother, RayMarcher, WalkabilityGrid, WalkableGrid, Waypoint,
    WorldPoint,
};

/// Install a test logger once; later calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Square grid with unit nodes and the given cells blocked.
pub fn grid_with_blocked(size: usize, blocked: &[(i32, i32)]) -> WalkabilityGrid {
    let mut grid = WalkabilityGrid::new(size, size, 1.0);
    for &(x, y) in blocked {
        grid.set_blocked(GridCoord::new(x, y));
    }
    grid
}

/// Square grid with roughly `density` of its cells blocked. The corner
/// cells (0, 0) and (size-1, size-1) are always free.
pub fn random_grid(size: usize, density: f64, seed: u64) -> WalkabilityGrid {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut grid = WalkabilityGrid::new(size, size, 1.0);
    let last = size as i32 - 1;

    for y in 0..size as i32 {
        for x in 0..size as i32 {
            let corner = (x == 0 && y == 0) || (x == last && y == last);
            if !corner && rng.gen_bool(density) {
                grid.set_blocked(GridCoord::new(x, y));
            }
        }
    }
    grid
}

/// Shortest 4-connected cell path, as the coarse pathfinder output the
/// smoother expects: cell centers, consecutive points adjacent.
pub fn coarse_path(
    grid: &WalkabilityGrid,
    start: GridCoord,
    goal: GridCoord,
) -> Option<Vec<Waypoint>> {
    if !grid.is_walkable(start) || !grid.is_walkable(goal) {
        return None;
    }

    let width = grid.width();
    let index = |c: GridCoord| c.y as usize * width + c.x as usize;
    let mut came_from: Vec<Option<GridCoord>> = vec![None; width * grid.height()];
    let mut queue = VecDeque::from([start]);
    came_from[index(start)] = Some(start);

    while let Some(current) = queue.pop_front() {
        if current == goal {
            break;
        }
        for (dx, dy) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
            let next = GridCoord::new(current.x + dx, current.y + dy);
            if grid.is_walkable(next) && came_from[index(next)].is_none() {
                came_from[index(next)] = Some(current);
                queue.push_back(next);
            }
        }
    }

    came_from[index(goal)]?;

    let mut cells = vec![goal];
    let mut current = goal;
    while current != start {
        current = came_from[index(current)]?;
        cells.push(current);
    }
    cells.reverse();

    Some(
        cells
            .into_iter()
            .map(|c| Waypoint::from_plane(grid.grid_to_world(c), 0.0))
            .collect(),
    )
}

/// Assert no segment of `path` enters a blocked cell, using the ray
/// marcher's cells directly. A segment lying on a grid line of a unit grid
/// is obstructed only where the cells on both sides of it are blocked.
pub fn assert_clear(grid: &WalkabilityGrid, path: &[Waypoint]) {
    let frame = grid.frame();
    for pair in path.windows(2) {
        let (from, to) = (pair[0].plane(), pair[1].plane());
        let blocked: Vec<GridCoord> = match grid_line_neighbors(from, to) {
            Some(sides) => sides
                .into_iter()
                .filter(|(near, far)| grid.is_blocked(*near) && grid.is_blocked(*far))
                .map(|(near, _)| near)
                .collect(),
            None => RayMarcher
                .traverse(from, to, &frame)
                .unwrap()
                .into_iter()
                .filter(|cell| grid.is_blocked(*cell))
                .collect(),
        };
        assert!(
            blocked.is_empty(),
            "segment {:?} -> {:?} crosses blocked cells {:?}",
            pair[0],
            pair[1],
            blocked
        );
    }
}

/// Cell pairs on either side of a segment running along a grid line.
fn grid_line_neighbors(from: WorldPoint, to: WorldPoint) -> Option<Vec<(GridCoord, GridCoord)>> {
    let on_line = |v: f32| (v - v.round()).abs() < 1e-4;
    let span = |a: f32, b: f32| {
        let (lo, hi) = (a.min(b), a.max(b));
        (lo + 1e-4).floor() as i32..=(hi - 1e-4).floor() as i32
    };

    if on_line(from.x) && on_line(to.x) && from.x.round() == to.x.round() {
        let x = from.x.round() as i32;
        Some(
            span(from.y, to.y)
                .map(|y| (GridCoord::new(x - 1, y), GridCoord::new(x, y)))
                .collect(),
        )
    } else if on_line(from.y) && on_line(to.y) && from.y.round() == to.y.round() {
        let y = from.y.round() as i32;
        Some(
            span(from.x, to.x)
                .map(|x| (GridCoord::new(x, y - 1), GridCoord::new(x, y)))
                .collect(),
        )
    } else {
        None
    }
}

/// Assert every interior point of `path` is needed: its neighbors cannot
/// see each other. A collinear triple passes only when the straight line
/// runs through a blocked cell vertex.
pub fn assert_taut<T: CellTraversal>(
    smoother: &PathSmoother<'_, WalkabilityGrid, T>,
    path: &[Waypoint],
) {
    for triple in path.windows(3) {
        assert!(
            !smoother.is_segment_clear(triple[0], triple[2]).unwrap(),
            "{:?} is redundant between {:?} and {:?}",
            triple[1],
            triple[0],
            triple[2]
        );
    }
}

/// Assert planar coordinates match within 1e-5.
pub fn assert_points(actual: &[Waypoint], expected: &[(f32, f32)]) {
    assert_eq!(actual.len(), expected.len(), "got {:?}", actual);
    for (point, &(x, y)) in actual.iter().zip(expected) {
        approx::assert_relative_eq!(point.x, x, epsilon = 1e-5);
        approx::assert_relative_eq!(point.y, y, epsilon = 1e-5);
    }
}
