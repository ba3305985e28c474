//! Turn-consistency relaxation.

use std::collections::HashSet;

use log::{debug, trace, warn};

use crate::core::{GridCoord, Waypoint, WorldPoint};
use crate::error::{Result, TantuError};
use crate::geometry::{TurnSign, cell_corners, corner_angles, turn_sign};
use crate::grid::{GridFrame, WalkableGrid};
use crate::traversal::CellTraversal;

use super::types::{SmoothedPath, SmootherConfig, Termination};

/// A segment whose endpoints are this close (cell units) to the same grid
/// line runs along that line rather than through the cells beside it.
const BOUNDARY_TOLERANCE: f32 = 1e-4;

/// A corner must lie at least this fraction of the segment away from both
/// endpoints to count as lying on it.
const ON_SEGMENT_MARGIN: f32 = 1e-4;

/// Reference directions shorter than this (world units) fall back to the
/// target direction.
const MIN_REFERENCE_LENGTH: f32 = 0.01;

/// A corner closer than this to the last accepted point coincides with it.
const COINCIDENT_DISTANCE: f32 = 1e-4;

/// Outcome of one relaxation step for a target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    /// Target reached; move to the next one
    Advance,
    /// A corner was inserted or released; try the same target again
    Retry,
    /// Blocked, and no corner can bend the segment
    Stuck,
}

/// Relaxation state for one `smooth` call.
struct Relaxation {
    accepted: Vec<Waypoint>,
    /// Turn sign recorded when the current last corner was inserted
    turn: TurnSign,
    corrections: usize,
}

impl Relaxation {
    fn new(start: Waypoint) -> Self {
        Self {
            accepted: vec![start],
            turn: TurnSign::Straight,
            corrections: 0,
        }
    }

    /// Last accepted point. `accepted` never drops below one entry.
    fn last(&self) -> Waypoint {
        self.accepted[self.accepted.len() - 1]
    }

    /// Point before the last, if any
    fn previous(&self) -> Option<Waypoint> {
        let len = self.accepted.len();
        (len > 1).then(|| self.accepted[len - 2])
    }
}

/// Corner considered for bending a blocked segment.
#[derive(Clone, Copy, Debug)]
struct Candidate {
    corner: WorldPoint,
    /// |angle| from the heading, degrees
    deviation: f32,
    /// Distance from the last accepted point
    distance: f32,
}

/// Taut-string path smoother.
///
/// Borrows the grid and the traversal strategy; both are read-only for the
/// lifetime of the smoother.
///
/// # Example
/// ```rust,ignore
/// let table = PatternTable::for_grid(&grid, DEFAULT_PRECISION)?;
/// let smoother = PathSmoother::with_defaults(&grid, &table);
/// let result = smoother.smooth(&coarse_path)?;
/// ```
pub struct PathSmoother<'a, G: WalkableGrid + ?Sized, T: CellTraversal + ?Sized> {
    grid: &'a G,
    traversal: &'a T,
    config: SmootherConfig,
}

impl<'a, G: WalkableGrid + ?Sized, T: CellTraversal + ?Sized> PathSmoother<'a, G, T> {
    /// Create a new path smoother
    pub fn new(grid: &'a G, traversal: &'a T, config: SmootherConfig) -> Self {
        Self {
            grid,
            traversal,
            config,
        }
    }

    /// Create with default configuration
    pub fn with_defaults(grid: &'a G, traversal: &'a T) -> Self {
        Self::new(grid, traversal, SmootherConfig::default())
    }

    pub fn config(&self) -> &SmootherConfig {
        &self.config
    }

    /// Pull `path` taut around the blocked cells of the grid.
    ///
    /// The first and last waypoints are returned unchanged. Interior input
    /// waypoints only steer corner selection; the output interior consists
    /// of cell corners. Running out of corrections is not an error: the
    /// partial path comes back with a non-converged [`Termination`].
    pub fn smooth(&self, path: &[Waypoint]) -> Result<SmoothedPath> {
        if path.len() < 2 {
            return Err(TantuError::PathTooShort(path.len()));
        }
        self.validate_grid()?;

        if path.len() == 2 {
            return Ok(SmoothedPath {
                waypoints: path.to_vec(),
                corrections: 0,
                termination: Termination::Converged,
            });
        }

        let frame = self.grid.frame();
        let mut state = Relaxation::new(path[0]);
        let mut termination = Termination::Converged;
        let mut target = 2;

        while target < path.len() {
            match self.relax(&mut state, path, target, &frame)? {
                Step::Advance => target += 1,
                Step::Retry => {
                    state.corrections += 1;
                    if state.corrections > self.config.max_stuck_iterations {
                        warn!(
                            "[Smoother] Gave up after {} corrections at target {}/{}",
                            state.corrections,
                            target,
                            path.len() - 1
                        );
                        termination = Termination::IterationLimit;
                        break;
                    }
                }
                Step::Stuck => {
                    warn!(
                        "[Smoother] No corner bends the segment to target {}/{}",
                        target,
                        path.len() - 1
                    );
                    termination = Termination::NoCandidateCorner;
                    break;
                }
            }
        }

        state.accepted.push(path[path.len() - 1]);

        if termination == Termination::Converged {
            let removed = self.remove_redundant(&mut state.accepted, &frame)?;
            if removed > 0 {
                debug!("[Smoother] Shortcut {} redundant corners", removed);
            }

            // A corner taken without a clear approach is never re-checked
            if !self.is_polyline_clear(&state.accepted, &frame)? {
                warn!("[Smoother] Relaxed path still crosses a blocked cell");
                termination = Termination::Obstructed;
            }
        }

        debug!(
            "[Smoother] {} -> {} waypoints, {} corrections ({:?})",
            path.len(),
            state.accepted.len(),
            state.corrections,
            termination
        );

        Ok(SmoothedPath {
            waypoints: state.accepted,
            corrections: state.corrections,
            termination,
        })
    }

    /// Smooth, falling back to the coarse path on any error or when the
    /// relaxation does not converge.
    pub fn smooth_or_coarse(&self, path: &[Waypoint]) -> Vec<Waypoint> {
        match self.smooth(path) {
            Ok(result) if result.converged() => result.waypoints,
            Ok(result) => {
                warn!(
                    "[Smoother] Relaxation ended with {:?}, keeping coarse path",
                    result.termination
                );
                path.to_vec()
            }
            Err(e) => {
                warn!("[Smoother] Smoothing failed ({}), keeping coarse path", e);
                path.to_vec()
            }
        }
    }

    /// Does the segment avoid every blocked cell?
    ///
    /// Uses the same rule as the relaxation. A segment running exactly along
    /// a grid line is blocked only where the cells on both sides are.
    pub fn is_segment_clear(&self, from: Waypoint, to: Waypoint) -> Result<bool> {
        let frame = self.grid.frame();
        Ok(self
            .blocked_cells(from.plane(), to.plane(), &frame)?
            .is_empty())
    }

    /// Drop interior points whose neighbors see each other directly.
    /// Returns how many were removed.
    fn remove_redundant(&self, waypoints: &mut Vec<Waypoint>, frame: &GridFrame) -> Result<usize> {
        let mut removed = 0;
        let mut i = 1;

        while i + 1 < waypoints.len() {
            let before = waypoints[i - 1].plane();
            let after = waypoints[i + 1].plane();
            if self.blocked_cells(before, after, frame)?.is_empty() {
                waypoints.remove(i);
                removed += 1;
                // The previous point has a new successor
                i = (i - 1).max(1);
            } else {
                i += 1;
            }
        }

        Ok(removed)
    }

    fn is_polyline_clear(&self, waypoints: &[Waypoint], frame: &GridFrame) -> Result<bool> {
        for pair in waypoints.windows(2) {
            if !self
                .blocked_cells(pair[0].plane(), pair[1].plane(), frame)?
                .is_empty()
            {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn validate_grid(&self) -> Result<()> {
        let node_size = self.grid.node_size();
        if self.grid.width() == 0 || self.grid.height() == 0 {
            return Err(TantuError::InvalidGrid(format!(
                "grid is {}x{}",
                self.grid.width(),
                self.grid.height()
            )));
        }
        if !node_size.is_finite() || node_size <= 0.0 {
            return Err(TantuError::InvalidGrid(format!(
                "node size {} is not a positive length",
                node_size
            )));
        }
        Ok(())
    }

    /// One relaxation step toward `path[index]`.
    fn relax(
        &self,
        state: &mut Relaxation,
        path: &[Waypoint],
        index: usize,
        frame: &GridFrame,
    ) -> Result<Step> {
        let target = path[index].plane();
        let last = state.last();
        let last_plane = last.plane();

        let blocked = self.blocked_cells(last_plane, target, frame)?;
        if !blocked.is_empty() {
            let reference = path[index - 1].plane();
            let heading = if last_plane.distance(&reference) < MIN_REFERENCE_LENGTH {
                target
            } else {
                reference
            };

            let Some(corner) = self.select_corner(&blocked, last_plane, heading, target, frame)?
            else {
                return Ok(Step::Stuck);
            };

            state.turn = turn_sign(last_plane, corner, target);
            state.accepted.push(Waypoint::from_plane(corner, last.z));
            debug!(
                "[Smoother] Bent at ({:.3}, {:.3}) around {} blocked cells, turn {:?}",
                corner.x,
                corner.y,
                blocked.len(),
                state.turn
            );
            return Ok(Step::Retry);
        }

        if let Some(previous) = state.previous()
            && turn_sign(previous.plane(), last_plane, target) != state.turn
        {
            state.accepted.pop();
            debug!(
                "[Smoother] Released ({:.3}, {:.3}), turn no longer {:?}",
                last.x, last.y, state.turn
            );
            if let Some(previous) = state.previous() {
                state.turn = turn_sign(previous.plane(), state.last().plane(), target);
            }
            return Ok(Step::Retry);
        }

        Ok(Step::Advance)
    }

    /// Blocked cells the segment crosses, deduplicated, in traversal order.
    fn blocked_cells(
        &self,
        from: WorldPoint,
        to: WorldPoint,
        frame: &GridFrame,
    ) -> Result<Vec<GridCoord>> {
        if let Some(cells) = self.blocked_along_grid_line(from, to, frame) {
            return Ok(cells);
        }

        let cells = self.traversal.traverse(from, to, frame)?;
        trace!(
            "[Smoother] ({:.3}, {:.3}) -> ({:.3}, {:.3}) crosses {} cells",
            from.x,
            from.y,
            to.x,
            to.y,
            cells.len()
        );

        let mut seen = HashSet::new();
        Ok(cells
            .into_iter()
            .filter(|cell| self.grid.is_blocked(*cell) && seen.insert(*cell))
            .collect())
    }

    /// Blocked cells beside a segment that runs exactly along a grid line.
    ///
    /// Such a segment separates the two rows (or columns) of cells on either
    /// side, so it is obstructed only where both neighbors are blocked; those
    /// pairs are returned. `None` if the segment does not lie on a grid line.
    fn blocked_along_grid_line(
        &self,
        from: WorldPoint,
        to: WorldPoint,
        frame: &GridFrame,
    ) -> Option<Vec<GridCoord>> {
        let a = frame.to_cell_space(from);
        let b = frame.to_cell_space(to);
        let on_line = |v: f32| (v - v.round()).abs() < BOUNDARY_TOLERANCE;

        let (line, lo, hi, vertical) = if on_line(a.x) && on_line(b.x) && a.x.round() == b.x.round()
        {
            (a.x.round() as i32, a.y.min(b.y), a.y.max(b.y), true)
        } else if on_line(a.y) && on_line(b.y) && a.y.round() == b.y.round() {
            (a.y.round() as i32, a.x.min(b.x), a.x.max(b.x), false)
        } else {
            return None;
        };

        let first = (lo + BOUNDARY_TOLERANCE).floor() as i32;
        let last = (hi - BOUNDARY_TOLERANCE).floor() as i32;

        let mut cells = Vec::new();
        for along in first..=last {
            let (near, far) = if vertical {
                (GridCoord::new(line - 1, along), GridCoord::new(line, along))
            } else {
                (GridCoord::new(along, line - 1), GridCoord::new(along, line))
            };
            if self.grid.is_blocked(near) && self.grid.is_blocked(far) {
                cells.push(near);
                cells.push(far);
            }
        }
        Some(cells)
    }

    /// Does the line `last -> target` merely touch the grid at `corner`,
    /// passing between free cells?
    ///
    /// A segment through a cell vertex crosses the cell ahead of the vertex
    /// and the cell behind it; the two cells beside it are only touched at
    /// the vertex. When ahead and behind are both free, bending exactly at
    /// the vertex clears the segment without a detour.
    fn touches_only_at(
        &self,
        corner: WorldPoint,
        last: WorldPoint,
        target: WorldPoint,
        frame: &GridFrame,
    ) -> bool {
        let direction = target - last;
        let length_sq = direction.dot(&direction);
        if direction.x.abs() < BOUNDARY_TOLERANCE || direction.y.abs() < BOUNDARY_TOLERANCE {
            return false;
        }

        let along = (corner - last).dot(&direction) / length_sq;
        if along <= ON_SEGMENT_MARGIN || along >= 1.0 - ON_SEGMENT_MARGIN {
            return false;
        }

        let vertex = frame.to_cell_space(corner);
        let (vx, vy) = (vertex.x.round() as i32, vertex.y.round() as i32);
        let (ahead_x, behind_x) = if direction.x > 0.0 { (vx, vx - 1) } else { (vx - 1, vx) };
        let (ahead_y, behind_y) = if direction.y > 0.0 { (vy, vy - 1) } else { (vy - 1, vy) };

        self.grid.is_walkable(GridCoord::new(ahead_x, ahead_y))
            && self.grid.is_walkable(GridCoord::new(behind_x, behind_y))
    }

    /// Corner of a blocked cell that deviates least from `heading`.
    ///
    /// Corners on the line `last -> target` are skipped since they cannot
    /// bend it, unless the line only touches the blocked cell at that
    /// corner. A corner the last point can reach without crossing another
    /// blocked cell wins over a better-ranked unreachable one.
    fn select_corner(
        &self,
        blocked: &[GridCoord],
        last: WorldPoint,
        heading: WorldPoint,
        target: WorldPoint,
        frame: &GridFrame,
    ) -> Result<Option<WorldPoint>> {
        let mut candidates = Vec::with_capacity(blocked.len() * 4);
        for &cell in blocked {
            let angles = corner_angles(cell, last, heading, frame);
            for (corner, angle) in cell_corners(cell, frame).into_iter().zip(angles) {
                let distance = corner.distance(&last);
                if distance < COINCIDENT_DISTANCE {
                    continue;
                }
                if turn_sign(last, corner, target) == TurnSign::Straight
                    && !self.touches_only_at(corner, last, target, frame)
                {
                    continue;
                }
                candidates.push(Candidate {
                    corner,
                    deviation: angle.abs(),
                    distance,
                });
            }
        }

        // Stable: equal candidates keep traversal order
        candidates.sort_by(|a, b| {
            a.deviation
                .total_cmp(&b.deviation)
                .then(b.distance.total_cmp(&a.distance))
        });

        for candidate in &candidates {
            if self.blocked_cells(last, candidate.corner, frame)?.is_empty() {
                return Ok(Some(candidate.corner));
            }
        }

        Ok(candidates.first().map(|candidate| candidate.corner))
    }
}
