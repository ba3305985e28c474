//! Taut-string path smoothing.
//!
//! Pulls a coarse grid path tight around the blocked cells it passes:
//!
//! ```text
//!   coarse                 smoothed
//!
//!   . . . . T              . . . . T
//!   . . . ╱ .              . . . ╱ .
//!   . . ╱ # .      ->      . . ●─# .
//!   . ╱ . # .              . ╱ . # .
//!   S . . . .              S . . . .
//! ```
//!
//! The relaxation walks the coarse waypoints as targets. Whenever the
//! segment from the last accepted point to the target crosses a blocked
//! cell, the blocking corner closest to the current heading is inserted and
//! the same target is retried. Once the segment is clear, the last inserted
//! corner is kept only while it still bends the path the same way it did
//! when inserted; otherwise it is released.

mod smoother;
mod types;

pub use smoother::PathSmoother;
pub use types::{SmoothedPath, SmootherConfig, Termination, path_length};
