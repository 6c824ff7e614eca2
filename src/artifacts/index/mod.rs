//! Index file format
//!
//! The index (also called staging area or cache) records the last-synchronized state
//! of every tracked file.
//!
//! ## File Format (Version 2)
//!
//! ```text
//! Header (12 bytes):
//!   - Signature: "DIRC" (4 bytes)
//!   - Version: 2 (4 bytes)
//!   - Entry count (4 bytes)
//!
//! Entries (variable length):
//!   - Each entry padded to 8-byte alignment
//!   - Contains metadata and path
//!
//! Checksum (20 bytes):
//!   - SHA-1 hash of all preceding bytes
//! ```

pub mod checksum;
pub mod entry_mode;
pub mod index_entry;
pub mod index_header;

use crate::artifacts::index::checksum::Checksum;
use crate::artifacts::index::index_entry::{EntryCursor, IndexEntry};
use crate::artifacts::index::index_header::IndexHeader;
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::errors::{Error, Result};
use bytes::Bytes;

/// Size of SHA-1 checksum in bytes
pub const CHECKSUM_SIZE: usize = 20;

/// Size of index header in bytes
pub const HEADER_SIZE: usize = 12; // 4 bytes for signature, 4 for version, 4 for entries_count

/// Magic signature identifying index files
pub const SIGNATURE: &[u8; 4] = b"DIRC";

/// Index file format version
pub const VERSION: u32 = 2;

/// Parse a complete index file
///
/// The checksum is verified before anything else is looked at. Bytes between the
/// last declared entry and the checksum (extensions written by other tools) are
/// ignored.
pub fn decode(data: &[u8]) -> Result<Vec<IndexEntry>> {
    let body = checksum::verify(data)?;

    let header = IndexHeader::deserialize(body)?;
    header.validate()?;

    let declared = header.entries_count as usize;
    let entries = EntryCursor::new(&body[HEADER_SIZE..])
        .take(declared)
        .collect::<Result<Vec<_>>>()?;

    if entries.len() != declared {
        return Err(Error::TruncatedIndex(format!(
            "header declares {declared} entries, found {}",
            entries.len()
        )));
    }

    Ok(entries)
}

/// Serialize entries into a complete index file, checksum included
pub fn encode(entries: &[IndexEntry]) -> Result<Bytes> {
    let mut writer = Checksum::new(Vec::new());

    let header = IndexHeader::with_count(entries.len() as u32);
    writer.write(&header.serialize()?)?;

    for entry in entries {
        writer.write(&entry.serialize()?)?;
    }

    Ok(writer.write_checksum()?.into())
}
