//! In-memory walkability grid.

use crate::core::{GridCoord, WorldPoint};
use crate::error::{Result, TantuError};

use super::walkable::WalkableGrid;

/// Dense walkability grid.
///
/// The grid uses a coordinate system where:
/// - Cell (0, 0) starts at `origin` in world coordinates
/// - Positive X is to the right
/// - Positive Y is up
/// - Cell (x, y) covers the area from (origin + x*node_size) to (origin + (x+1)*node_size)
///
/// Cells are stored row-major, `y * width + x`.
#[derive(Clone, Debug)]
pub struct WalkabilityGrid {
    walkable: Vec<bool>,
    width: usize,
    height: usize,
    node_size: f32,
    origin: WorldPoint,
}

impl WalkabilityGrid {
    /// Create an all-walkable grid anchored at the world origin
    pub fn new(width: usize, height: usize, node_size: f32) -> Self {
        Self::with_origin(width, height, node_size, WorldPoint::ZERO)
    }

    /// Create an all-walkable grid whose cell (0, 0) starts at `origin`
    pub fn with_origin(width: usize, height: usize, node_size: f32, origin: WorldPoint) -> Self {
        Self {
            walkable: vec![true; width * height],
            width,
            height,
            node_size,
            origin,
        }
    }

    /// Parse a grid from an ASCII map.
    ///
    /// `#` is blocked, `.` is walkable. The first non-empty line is the top
    /// row (highest y). Leading and trailing whitespace on each line is
    /// ignored.
    pub fn from_ascii(map: &str, node_size: f32) -> Result<Self> {
        let rows: Vec<&str> = map
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let height = rows.len();
        let width = rows.first().map(|row| row.chars().count()).unwrap_or(0);
        if width == 0 {
            return Err(TantuError::InvalidGrid("ASCII map is empty".to_string()));
        }

        let mut grid = Self::new(width, height, node_size);
        for (row_index, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(TantuError::InvalidGrid(format!(
                    "row {} has {} cells, expected {}",
                    row_index,
                    row.chars().count(),
                    width
                )));
            }

            let y = (height - 1 - row_index) as i32;
            for (x, ch) in row.chars().enumerate() {
                let walkable = match ch {
                    '.' => true,
                    '#' => false,
                    other => {
                        return Err(TantuError::InvalidGrid(format!(
                            "unexpected cell '{}' at row {}, column {}",
                            other, row_index, x
                        )));
                    }
                };
                grid.set_walkable(GridCoord::new(x as i32, y), walkable);
            }
        }

        Ok(grid)
    }

    /// Check if coordinates are within grid bounds
    #[inline]
    pub fn is_valid_coord(&self, coord: GridCoord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && (coord.x as usize) < self.width
            && (coord.y as usize) < self.height
    }

    #[inline]
    fn index(&self, coord: GridCoord) -> Option<usize> {
        if self.is_valid_coord(coord) {
            Some(coord.y as usize * self.width + coord.x as usize)
        } else {
            None
        }
    }

    /// Set walkability of a cell. Returns false if out of bounds.
    pub fn set_walkable(&mut self, coord: GridCoord, walkable: bool) -> bool {
        match self.index(coord) {
            Some(idx) => {
                self.walkable[idx] = walkable;
                true
            }
            None => false,
        }
    }

    /// Mark a cell blocked. Returns false if out of bounds.
    pub fn set_blocked(&mut self, coord: GridCoord) -> bool {
        self.set_walkable(coord, false)
    }

    /// Mark every cell of an inclusive rectangle blocked
    pub fn block_rect(&mut self, min: GridCoord, max: GridCoord) {
        for y in min.y..=max.y {
            for x in min.x..=max.x {
                self.set_blocked(GridCoord::new(x, y));
            }
        }
    }

    /// Number of blocked cells inside the grid
    pub fn blocked_count(&self) -> usize {
        self.walkable.iter().filter(|w| !**w).count()
    }

    /// Convert world coordinates to grid coordinates
    #[inline]
    pub fn world_to_grid(&self, point: WorldPoint) -> GridCoord {
        self.frame().cell_of(point)
    }

    /// Convert grid coordinates to world coordinates (cell center)
    #[inline]
    pub fn grid_to_world(&self, coord: GridCoord) -> WorldPoint {
        self.frame().cell_center(coord)
    }
}

impl WalkableGrid for WalkabilityGrid {
    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn node_size(&self) -> f32 {
        self.node_size
    }

    #[inline]
    fn origin(&self) -> WorldPoint {
        self.origin
    }

    #[inline]
    fn is_walkable(&self, coord: GridCoord) -> bool {
        self.index(coord).map(|idx| self.walkable[idx]).unwrap_or(false)
    }
}
