//! Smoother configuration and results.

use crate::core::Waypoint;

/// Path smoother configuration
#[derive(Clone, Debug)]
pub struct SmootherConfig {
    /// Corrections (corner insertions plus removals) allowed before the
    /// relaxation gives up and returns what it has.
    pub max_stuck_iterations: usize,
}

impl Default for SmootherConfig {
    fn default() -> Self {
        Self {
            max_stuck_iterations: 1000,
        }
    }
}

/// Why the relaxation stopped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Termination {
    /// Every target was reached with a consistent turn sequence
    #[default]
    Converged,
    /// More than `max_stuck_iterations` corrections were needed
    IterationLimit,
    /// A blocked segment offered no corner that could bend it
    NoCandidateCorner,
    /// The relaxation finished, but a segment between two inserted corners
    /// still crosses a blocked cell
    Obstructed,
}

/// Output of [`PathSmoother::smooth`](super::PathSmoother::smooth).
#[derive(Clone, Debug)]
pub struct SmoothedPath {
    /// Smoothed waypoints; first and last equal the input's
    pub waypoints: Vec<Waypoint>,
    /// Corner insertions plus removals performed
    pub corrections: usize,
    pub termination: Termination,
}

impl SmoothedPath {
    /// True if the relaxation finished normally
    #[inline]
    pub fn converged(&self) -> bool {
        self.termination == Termination::Converged
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Planar length of the smoothed polyline
    pub fn length(&self) -> f32 {
        path_length(&self.waypoints)
    }
}

/// Planar (x, y) length of a polyline. `z` is ignored.
pub fn path_length(path: &[Waypoint]) -> f32 {
    path.windows(2)
        .map(|pair| pair[0].plane().distance(&pair[1].plane()))
        .sum()
}
