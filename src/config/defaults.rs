//! Default value functions for serde deserialization.

use crate::traversal::{DEFAULT_PRECISION, TraversalStrategy};

pub fn strategy() -> TraversalStrategy {
    TraversalStrategy::PatternTable
}

pub fn cell_retrieval_precision() -> u32 {
    DEFAULT_PRECISION
}

pub fn max_stuck_iterations() -> usize {
    1000
}
