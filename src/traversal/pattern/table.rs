//! Precomputed selection patterns for every displacement class.

use std::time::Instant;

use log::{debug, trace};

use crate::core::{GridCoord, WorldPoint};
use crate::error::{Result, TantuError};
use crate::grid::{GridFrame, WalkableGrid};
use crate::traversal::{CellSegment, CellTraversal};

/// Default sampling density (samples per cell of Manhattan length).
pub const DEFAULT_PRECISION: u32 = 10;

/// A sample touches every cell whose center lies closer than this
/// (Chebyshev, cell units).
const TOUCH_RADIUS: f32 = 1.0 - 1e-3;

/// Canonical segments are shortened by this fraction of their length at
/// each end before sampling...
const SHRINK_FRACTION: f32 = 0.01;

/// ...but never by more than this many cells.
const MAX_SHRINK: f32 = 0.05;

/// Dense index of a displacement class in a table of the given width.
///
/// Bijective from `{(dx_max, dy_min) : 0 <= dy_min <= dx_max < width}` onto
/// `0..pattern_count(width)`.
#[inline]
pub fn pattern_index(dx_max: usize, dy_min: usize, width: usize) -> usize {
    dx_max - dy_min + (2 * width * dy_min + dy_min - dy_min * dy_min) / 2
}

/// Number of displacement classes for a table width
#[inline]
pub fn pattern_count(width: usize) -> usize {
    width * (width + 1) / 2
}

/// Axis-sorted absolute displacement `(dx_max, dy_min)`.
///
/// One class stands for every segment related by translation, axis
/// mirroring and swapping of the axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DisplacementClass {
    /// Larger absolute axis displacement (cells)
    pub dx_max: usize,
    /// Smaller absolute axis displacement (cells)
    pub dy_min: usize,
}

impl DisplacementClass {
    /// Canonical class of a signed cell displacement.
    ///
    /// The flag is true when the axes were swapped (`|dy| > |dx|`).
    pub fn from_displacement(dx: i32, dy: i32) -> (Self, bool) {
        let ax = dx.unsigned_abs() as usize;
        let ay = dy.unsigned_abs() as usize;
        let mirror = ay > ax;
        let class = DisplacementClass {
            dx_max: ax.max(ay),
            dy_min: ax.min(ay),
        };
        (class, mirror)
    }

    /// Index in a table of the given width, if the class fits
    #[inline]
    pub fn index(&self, width: usize) -> Option<usize> {
        if self.dy_min <= self.dx_max && self.dx_max < width {
            Some(pattern_index(self.dx_max, self.dy_min, width))
        } else {
            None
        }
    }
}

/// Boolean matrix of the relative cells a canonical segment touches.
///
/// Shape `(dx_max + 1) x (dy_min + 1)`; entry `[i][j]` refers to the cell at
/// offset `(i, j)` from the start cell.
#[derive(Clone, Debug)]
pub struct SelectionPattern {
    class: DisplacementClass,
    cells: Vec<bool>,
}

impl SelectionPattern {
    /// Sample the canonical segment of a class.
    ///
    /// The segment runs from the center of cell (0, 0) to the center of
    /// cell (dx_max, dy_min); cell centers sit on integer coordinates here.
    fn sample(class: DisplacementClass, precision: u32) -> Self {
        let rows = class.dx_max + 1;
        let cols = class.dy_min + 1;
        let mut pattern = Self {
            class,
            cells: vec![false; rows * cols],
        };

        let full_end = WorldPoint::new(class.dx_max as f32, class.dy_min as f32);
        let length = full_end.length();
        let (start, end) = if length > 0.0 {
            let shrink = (length * SHRINK_FRACTION).min(MAX_SHRINK);
            let direction = full_end * (1.0 / length);
            (direction * shrink, full_end - direction * shrink)
        } else {
            (WorldPoint::ZERO, WorldPoint::ZERO)
        };

        let steps = (precision as usize * (class.dx_max + class.dy_min)).max(1);
        let span = end - start;
        for s in 0..=steps {
            let t = s as f32 / steps as f32;
            pattern.mark_near(start + span * t);
        }

        pattern
    }

    /// Mark the cells of the 3x3 neighborhood around `sample` that it touches
    fn mark_near(&mut self, sample: WorldPoint) {
        let cx = sample.x.round() as i64;
        let cy = sample.y.round() as i64;

        for i in (cx - 1)..=(cx + 1) {
            for j in (cy - 1)..=(cy + 1) {
                if i < 0 || j < 0 || i > self.class.dx_max as i64 || j > self.class.dy_min as i64 {
                    continue;
                }
                let distance = (sample.x - i as f32).abs().max((sample.y - j as f32).abs());
                if distance < TOUCH_RADIUS {
                    let idx = self.offset(i as usize, j as usize);
                    self.cells[idx] = true;
                }
            }
        }
    }

    #[inline]
    fn offset(&self, i: usize, j: usize) -> usize {
        i * (self.class.dy_min + 1) + j
    }

    /// Class this pattern belongs to
    pub fn class(&self) -> DisplacementClass {
        self.class
    }

    /// Matrix shape `(rows, cols)` = `(dx_max + 1, dy_min + 1)`
    pub fn shape(&self) -> (usize, usize) {
        (self.class.dx_max + 1, self.class.dy_min + 1)
    }

    /// Is relative cell `(i, j)` touched? Out-of-shape entries are not.
    pub fn is_touched(&self, i: usize, j: usize) -> bool {
        i <= self.class.dx_max && j <= self.class.dy_min && self.cells[self.offset(i, j)]
    }

    /// Touched `(i, j)` entries in row-major order
    pub fn touched(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let cols = self.class.dy_min + 1;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, touched)| **touched)
            .map(move |(idx, _)| (idx / cols, idx % cols))
    }

    /// Number of touched entries
    pub fn touched_count(&self) -> usize {
        self.cells.iter().filter(|touched| **touched).count()
    }
}

/// Selection patterns for every displacement class up to a grid width.
///
/// Built once, then immutable. The table depends only on the width and the
/// sampling precision, never on grid content, so one table serves any number
/// of smoothers and obstacle layouts of that width. Memory grows with the
/// fourth power of the width.
///
/// # Example
/// ```rust,ignore
/// let table = PatternTable::for_grid(&grid, DEFAULT_PRECISION)?;
/// let cells = table.traverse(start, end, &grid.frame())?;
/// ```
#[derive(Clone, Debug)]
pub struct PatternTable {
    width: usize,
    precision: u32,
    patterns: Vec<SelectionPattern>,
}

impl PatternTable {
    /// Sample every displacement class with `dx_max < width`.
    pub fn build(width: usize, precision: u32) -> Result<Self> {
        if width == 0 {
            return Err(TantuError::InvalidTable("width must be at least 1".to_string()));
        }
        if precision == 0 {
            return Err(TantuError::InvalidTable(
                "precision must be at least 1".to_string(),
            ));
        }

        let started = Instant::now();
        let mut patterns = Vec::with_capacity(pattern_count(width));

        // Indices grow with dx_max inside each dy_min band
        for dy_min in 0..width {
            for dx_max in dy_min..width {
                let class = DisplacementClass { dx_max, dy_min };
                debug_assert_eq!(patterns.len(), pattern_index(dx_max, dy_min, width));
                patterns.push(SelectionPattern::sample(class, precision));
            }
        }

        debug!(
            "[PatternTable] built {} patterns for width {} (precision {}) in {:?}",
            patterns.len(),
            width,
            precision,
            started.elapsed()
        );

        Ok(Self {
            width,
            precision,
            patterns,
        })
    }

    /// Build a table wide enough for every segment inside `grid`
    pub fn for_grid<G: WalkableGrid + ?Sized>(grid: &G, precision: u32) -> Result<Self> {
        Self::build(grid.extent(), precision)
    }

    /// Largest displacement + 1 the table covers
    pub fn width(&self) -> usize {
        self.width
    }

    /// Sampling precision used at build time
    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Number of patterns
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// True if the table holds no patterns
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Pattern of a class, if it fits the table
    pub fn pattern(&self, class: DisplacementClass) -> Option<&SelectionPattern> {
        class.index(self.width).and_then(|idx| self.patterns.get(idx))
    }

    /// All patterns in index order
    pub fn patterns(&self) -> &[SelectionPattern] {
        &self.patterns
    }

    /// Cells touched by a segment whose end cell is `start_cell + (dx, dy)`.
    pub fn cells_for_displacement(
        &self,
        start_cell: GridCoord,
        dx: i32,
        dy: i32,
    ) -> Result<Vec<GridCoord>> {
        let (class, mirror) = DisplacementClass::from_displacement(dx, dy);
        let pattern = self
            .pattern(class)
            .ok_or(TantuError::DisplacementOutOfRange {
                dx_max: class.dx_max,
                dy_min: class.dy_min,
                width: self.width,
            })?;

        let sx = if dx < 0 { -1 } else { 1 };
        let sy = if dy < 0 { -1 } else { 1 };

        let cells = pattern
            .touched()
            .map(|(i, j)| {
                let (a, b) = if mirror { (j, i) } else { (i, j) };
                start_cell + GridCoord::new(sx * a as i32, sy * b as i32)
            })
            .collect();

        Ok(cells)
    }
}

impl CellTraversal for PatternTable {
    fn traverse(
        &self,
        start: WorldPoint,
        end: WorldPoint,
        frame: &GridFrame,
    ) -> Result<Vec<GridCoord>> {
        let segment = CellSegment::prepare(start, end, frame)?;
        let start_cell = segment.start_cell();
        let delta = segment.end_cell() - start_cell;

        trace!(
            "[PatternTable] query from ({},{}) displacement ({},{})",
            start_cell.x, start_cell.y, delta.x, delta.y
        );

        self.cells_for_displacement(start_cell, delta.x, delta.y)
    }
}
