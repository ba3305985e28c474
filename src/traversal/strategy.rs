//! Runtime choice between the traversal strategies.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::{GridCoord, WorldPoint};
use crate::error::Result;
use crate::grid::{GridFrame, WalkableGrid};

use super::{CellTraversal, PatternTable, PatternTableCache, RayMarcher};

/// Which [`CellTraversal`] a configured smoother uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraversalStrategy {
    /// Precomputed [`PatternTable`]
    #[default]
    PatternTable,
    /// Incremental [`RayMarcher`]
    RayMarch,
}

/// A resolved traversal strategy, ready to query.
#[derive(Clone, Debug)]
pub enum Traversal {
    RayMarch(RayMarcher),
    PatternTable(Arc<PatternTable>),
}

impl Traversal {
    /// Resolve a strategy for `grid`, fetching the pattern table from `cache`.
    pub fn for_grid<G: WalkableGrid + ?Sized>(
        strategy: TraversalStrategy,
        grid: &G,
        cache: &PatternTableCache,
        precision: u32,
    ) -> Result<Self> {
        Ok(match strategy {
            TraversalStrategy::RayMarch => Traversal::RayMarch(RayMarcher::new()),
            TraversalStrategy::PatternTable => {
                Traversal::PatternTable(cache.for_grid(grid, precision)?)
            }
        })
    }

    pub fn strategy(&self) -> TraversalStrategy {
        match self {
            Traversal::RayMarch(_) => TraversalStrategy::RayMarch,
            Traversal::PatternTable(_) => TraversalStrategy::PatternTable,
        }
    }
}

impl CellTraversal for Traversal {
    fn traverse(
        &self,
        start: WorldPoint,
        end: WorldPoint,
        frame: &GridFrame,
    ) -> Result<Vec<GridCoord>> {
        match self {
            Traversal::RayMarch(marcher) => marcher.traverse(start, end, frame),
            Traversal::PatternTable(table) => table.traverse(start, end, frame),
        }
    }
}
