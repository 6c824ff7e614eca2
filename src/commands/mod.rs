//! Command implementations
//!
//! Commands are organized into two categories following git's architecture:
//!
//! - `plumbing`: Low-level commands over objects and the index (hash-object, cat-file)
//! - `porcelain`: User-facing workflows (init, add, status, diff)
//!
//! Each command is an inherent method on [`Repository`](crate::areas::repository::Repository)
//! that writes its output to the repository's writer.

pub mod plumbing;
pub mod porcelain;
