//! Walkability grids.
//!
//! The smoother never owns a grid; it borrows anything implementing
//! [`WalkableGrid`]. [`WalkabilityGrid`] is a dense in-memory implementation
//! for hosts that do not already have one.
//!
//! ## Cell Convention
//!
//! A cell index names a grid *square*, not a grid vertex:
//!
//! ```text
//!   y
//!   2 ┼───┼───┼───┼
//!     │0,1│1,1│2,1│      cell (x, y) covers [x, x+1) × [y, y+1)
//!   1 ┼───┼───┼───┼      in cell space, center at (x+0.5, y+0.5)
//!     │0,0│1,0│2,0│
//!   0 ┼───┼───┼───┼ x
//!     0   1   2   3
//! ```
//!
//! Blocked-cell tests check exactly one square. Cell corners sit on the
//! integer lattice of cell space.

mod storage;
mod walkable;

pub use storage::WalkabilityGrid;
pub use walkable::{GridFrame, WalkableGrid};
