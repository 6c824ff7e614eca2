//! Working tree status
//!
//! - `inspector`: pure classification of working paths against index entries
//! - `status_info`: the classified result and the repository-bound entry point

pub mod inspector;
pub mod status_info;
