//! Path smoothing configuration section.

use serde::{Deserialize, Serialize};

use crate::smoothing::SmootherConfig;
use crate::traversal::TraversalStrategy;

use super::defaults;

/// Path smoothing settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SmoothingSection {
    /// Cell traversal strategy
    #[serde(default = "defaults::strategy")]
    pub strategy: TraversalStrategy,

    /// Pattern table samples per cell of segment length
    #[serde(default = "defaults::cell_retrieval_precision")]
    pub cell_retrieval_precision: u32,

    /// Corrections allowed before the relaxation gives up
    #[serde(default = "defaults::max_stuck_iterations")]
    pub max_stuck_iterations: usize,
}

impl Default for SmoothingSection {
    fn default() -> Self {
        Self {
            strategy: defaults::strategy(),
            cell_retrieval_precision: defaults::cell_retrieval_precision(),
            max_stuck_iterations: defaults::max_stuck_iterations(),
        }
    }
}

impl SmoothingSection {
    /// Convert to SmootherConfig
    pub fn to_smoother_config(&self) -> SmootherConfig {
        SmootherConfig {
            max_stuck_iterations: self.max_stuck_iterations,
        }
    }
}
