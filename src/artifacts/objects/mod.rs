//! Object types and operations
//!
//! All content is stored as objects identified by SHA-1 hashes:
//!
//! - **Blob**: file content (raw bytes)
//! - **Tree**: directory listing (modes, names, and object IDs)
//! - **Commit**: accepted by the store and displayed raw; never built here
//!
//! Every object serializes to `<type> <size>\0<content>` before hashing and compression.

pub mod display_mode;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tree;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of a SHA-1 hash in raw bytes
pub const OBJECT_ID_BYTES: usize = 20;
