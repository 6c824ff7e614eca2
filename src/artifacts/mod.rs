//! Data structures and algorithms
//!
//! - `diff`: Myers' diff and unified hunks
//! - `index`: Binary index format
//! - `objects`: Object types, IDs and trees
//! - `status`: Working tree classification

pub mod diff;
pub mod index;
pub mod objects;
pub mod status;
