//! Core types for the Tantu library.
//!
//! ## Coordinates
//! - [`GridCoord`]: Integer cell indices for grid access
//! - [`WorldPoint`]: Floating-point point in the horizontal plane
//! - [`Waypoint`]: Path point; the horizontal plane plus a vertical
//!   coordinate that smoothing carries through unchanged
//!
//! Axes follow the usual map convention: X to the right, Y up, Z up out of
//! the plane (unused by the geometry).

mod point;

pub use point::{GridCoord, Waypoint, WorldPoint};
