//! # Tantu: Taut-String Path Smoothing
//!
//! Pulls the staircase paths produced by grid pathfinders tight around the
//! obstacles they pass, so the result bends only at blocked-cell corners.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tantu::{PathSmoother, PatternTable, WalkabilityGrid, Waypoint, DEFAULT_PRECISION};
//!
//! let grid = WalkabilityGrid::from_ascii(
//!     "
//!     ......
//!     ..#...
//!     ..#...
//!     ......
//!     ",
//!     1.0,
//! )?;
//! let table = PatternTable::for_grid(&grid, DEFAULT_PRECISION)?;
//! let smoother = PathSmoother::with_defaults(&grid, &table);
//!
//! let coarse = [
//!     Waypoint::planar(0.5, 0.5),
//!     Waypoint::planar(1.5, 1.5),
//!     Waypoint::planar(1.5, 2.5),
//!     Waypoint::planar(5.5, 3.5),
//! ];
//! let result = smoother.smooth(&coarse)?;
//! println!("{} waypoints, converged: {}", result.len(), result.converged());
//! # Ok::<(), tantu::TantuError>(())
//! ```
//!
//! ## Coordinate Frame
//!
//! - Cell `(x, y)` covers `[origin + x * node_size, origin + (x + 1) * node_size)`
//!   on each axis
//! - Positive Y is up; angles are counter-clockwise positive, in degrees
//! - Waypoint `z` is carried through and never affects geometry
//!
//! ## Architecture
//!
//! - [`core`]: Fundamental types (GridCoord, WorldPoint, Waypoint)
//! - [`grid`]: The [`WalkableGrid`] trait and an in-memory implementation
//! - [`geometry`]: Cell corners and signed turn angles
//! - [`traversal`]: Cells crossed by a segment (ray marching or pattern table)
//! - [`smoothing`]: The taut-string relaxation
//! - [`config`]: YAML configuration
//!
//! ## Data Flow
//!
//! ```text
//!   coarse path ──▶ PathSmoother ──▶ SmoothedPath
//!                       │
//!          per segment  │  blocked? corner choice
//!                       ▼
//!                 CellTraversal ◀── PatternTable (cached per width)
//!                       │
//!                       ▼
//!                  WalkableGrid
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod smoothing;
pub mod traversal;

pub use config::{SmoothingSection, TantuConfig};
pub use crate::core::{GridCoord, Waypoint, WorldPoint};
pub use error::{Result, TantuError};
pub use geometry::TurnSign;
pub use grid::{GridFrame, WalkabilityGrid, WalkableGrid};
pub use smoothing::{PathSmoother, SmoothedPath, SmootherConfig, Termination, path_length};
pub use traversal::{
    CellTraversal, DEFAULT_PRECISION, PatternTable, PatternTableCache, RayMarcher, Traversal,
    TraversalStrategy,
};
