//! Shared pattern tables keyed by width and precision.

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;
use parking_lot::Mutex;

use crate::error::Result;
use crate::grid::WalkableGrid;

use super::PatternTable;

/// Process-wide store of built [`PatternTable`]s.
///
/// Tables are immutable once built, so handing out `Arc` clones lets any
/// number of smoothers share one. The lock is held while a missing table is
/// built; concurrent callers asking for the same key wait rather than
/// building twice.
#[derive(Debug, Default)]
pub struct PatternTableCache {
    tables: Mutex<HashMap<(usize, u32), Arc<PatternTable>>>,
}

impl PatternTableCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table for `(width, precision)`, building it on first request.
    pub fn get_or_build(&self, width: usize, precision: u32) -> Result<Arc<PatternTable>> {
        let mut tables = self.tables.lock();
        if let Some(table) = tables.get(&(width, precision)) {
            return Ok(Arc::clone(table));
        }

        let table = Arc::new(PatternTable::build(width, precision)?);
        tables.insert((width, precision), Arc::clone(&table));
        debug!(
            "[PatternTableCache] cached table width={} precision={} ({} entries)",
            width,
            precision,
            tables.len()
        );
        Ok(table)
    }

    /// Table wide enough for `grid`
    pub fn for_grid<G: WalkableGrid + ?Sized>(
        &self,
        grid: &G,
        precision: u32,
    ) -> Result<Arc<PatternTable>> {
        self.get_or_build(grid.extent(), precision)
    }

    /// Drop every table of the given width. Returns how many were removed.
    pub fn invalidate(&self, width: usize) -> usize {
        let mut tables = self.tables.lock();
        let before = tables.len();
        tables.retain(|(w, _), _| *w != width);
        before - tables.len()
    }

    pub fn clear(&self) {
        self.tables.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.tables.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.lock().is_empty()
    }
}
