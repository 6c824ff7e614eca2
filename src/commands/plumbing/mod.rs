//! Plumbing commands (low-level operations)
//!
//! Direct access to the object store and the index; mostly useful for scripting
//! and for inspecting what the porcelain commands wrote.
//!
//! ## Commands
//!
//! - `hash-object`: Compute an object ID and optionally store the object
//! - `cat-file`: Display an object by (abbreviated) ID
//! - `ls-files`: List staged paths
//! - `write-tree`: Store the index as tree objects

pub mod cat_file;
pub mod hash_object;
pub mod ls_files;
pub mod write_tree;
