//! A minimal content-addressable storage engine
//!
//! Stores zlib-compressed objects named by their SHA-1, keeps a binary staging
//! index compatible with git's version 2 format, and compares the working tree
//! against that index.

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;
