//! Line-level comparison of staged and working content
//!
//! - `diff_algorithm`: Myers' shortest edit script
//! - `diff_target`: loading either side of a comparison
//! - `hunk`: grouping edits into unified-diff hunks

pub mod diff_algorithm;
pub mod diff_target;
pub mod hunk;
