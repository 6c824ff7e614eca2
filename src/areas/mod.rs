//! Repository storage areas
//!
//! - `database`: loose object store under `.git/objects`
//! - `index`: the staging area file `.git/index`
//! - `repository`: ties the areas to one working root and an output writer
//! - `workspace`: the working tree itself

pub mod database;
pub mod index;
pub mod repository;
pub mod workspace;
