//! Lookup-table traversal.
//!
//! A segment's cell set depends only on its end cells, up to translation,
//! mirroring and axis swap. Every displacement class `(dx_max, dy_min)` with
//! `0 <= dy_min <= dx_max < width` gets one [`SelectionPattern`], sampled
//! once from the segment between the two cell centers. A query reduces to a
//! table lookup plus a coordinate transform.
//!
//! ```text
//! class (5, 2), touched cells marked:
//!
//!   j=2   .  .  ■  ■  ■  ■
//!   j=1   ■  ■  ■  ■  ■  ■
//!   j=0   ■  ■  ■  ■  .  .
//!        i=0 1  2  3  4  5
//! ```

mod cache;
mod table;

pub use cache::PatternTableCache;
pub use table::{
    DEFAULT_PRECISION, DisplacementClass, PatternTable, SelectionPattern, pattern_count,
    pattern_index,
};
