//! Index entry representation
//!
//! Each entry in the index represents a tracked file with:
//! - File path, relative to the working root and `/`-separated
//! - Content hash (object ID)
//! - File metadata (mode, size, timestamps)
//!
//! ## Entry Format
//!
//! A 62-byte fixed block (big-endian), then the path, a NUL terminator, and zero
//! padding so the whole entry is a multiple of 8 bytes:
//!
//! ```text
//! offset  size  field
//!      0     4  ctime seconds
//!      4     4  ctime nanoseconds
//!      8     4  mtime seconds
//!     12     4  mtime nanoseconds
//!     16     4  device
//!     20     4  inode
//!     24     4  mode
//!     28     4  uid
//!     32     4  gid
//!     36     4  size
//!     40    20  object id
//!     60     2  flags (stage in the top 2 bits, path length in the low 12)
//!     62     n  path, NUL, padding
//! ```

use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::objects::object::Packable;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, Result};
use byteorder::{ReadBytesExt, WriteBytesExt};
use bytes::Bytes;
use derive_new::new;
use is_executable::IsExecutable;
use std::fs::Metadata;
use std::io::Write;
use std::os::unix::prelude::MetadataExt;
use std::path::Path;

/// Block size for entry alignment (8 bytes)
pub const ENTRY_BLOCK: usize = 8;

/// Size of the fixed metadata block preceding the path
pub const ENTRY_FIXED_SIZE: usize = 62;

/// Largest path length representable in the flags field
const MAX_PATH_SIZE: usize = 0x0FFF;

const STAGE_SHIFT: u16 = 14;

/// Index entry representing a tracked file
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct IndexEntry {
    /// Path relative to the working root, `/`-separated
    pub path: String,
    /// SHA-1 of the tracked content
    pub oid: ObjectId,
    pub metadata: EntryMetadata,
}

impl IndexEntry {
    /// Entry for freshly staged content; stage 0, path length in the flags.
    pub fn from_stat(path: String, oid: ObjectId, metadata: EntryMetadata) -> Self {
        let flags = path.len().min(MAX_PATH_SIZE) as u16;

        IndexEntry {
            path,
            oid,
            metadata: EntryMetadata { flags, ..metadata },
        }
    }

    /// Merge stage (0 for a normal entry)
    pub fn stage(&self) -> u8 {
        (self.metadata.flags >> STAGE_SHIFT) as u8
    }

    /// Serialized length of an entry whose path is `path_len` bytes long
    ///
    /// The path is always followed by at least one NUL byte, and the total is
    /// rounded up to the next multiple of [`ENTRY_BLOCK`].
    pub fn padded_len(path_len: usize) -> usize {
        (ENTRY_FIXED_SIZE + path_len + ENTRY_BLOCK) / ENTRY_BLOCK * ENTRY_BLOCK
    }
}

/// File metadata stored in the fixed block of an entry
///
/// Every field is 32 bits wide on disk; wider platform values are truncated the
/// same way git truncates them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryMetadata {
    pub ctime: u32,
    pub ctime_nsec: u32,
    pub mtime: u32,
    pub mtime_nsec: u32,
    pub dev: u32,
    pub ino: u32,
    pub mode: EntryMode,
    pub uid: u32,
    pub gid: u32,
    pub size: u32,
    pub flags: u16,
}

impl EntryMetadata {
    /// Capture the stat data of the file at `file_path`
    ///
    /// Modes are normalized to `100644`/`100755`; flags are left for the entry to fill.
    pub fn from_stat(file_path: &Path, metadata: &Metadata) -> Self {
        let mode = if file_path.is_executable() {
            EntryMode::EXECUTABLE
        } else {
            EntryMode::REGULAR
        };

        EntryMetadata {
            ctime: metadata.ctime() as u32,
            ctime_nsec: metadata.ctime_nsec() as u32,
            mtime: metadata.mtime() as u32,
            mtime_nsec: metadata.mtime_nsec() as u32,
            dev: metadata.dev() as u32,
            ino: metadata.ino() as u32,
            mode,
            uid: metadata.uid(),
            gid: metadata.gid(),
            size: metadata.size() as u32,
            flags: 0,
        }
    }
}

impl Packable for IndexEntry {
    fn serialize(&self) -> Result<Bytes> {
        if self.path.is_empty() || self.path.contains('\0') {
            return Err(Error::InvalidPath(self.path.clone().into()));
        }

        let meta = &self.metadata;
        let mut entry_bytes = Vec::with_capacity(Self::padded_len(self.path.len()));
        entry_bytes.write_u32::<byteorder::NetworkEndian>(meta.ctime)?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(meta.ctime_nsec)?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(meta.mtime)?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(meta.mtime_nsec)?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(meta.dev)?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(meta.ino)?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(meta.mode.as_u32())?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(meta.uid)?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(meta.gid)?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(meta.size)?;
        self.oid.write_h40_to(&mut entry_bytes)?;
        entry_bytes.write_u16::<byteorder::NetworkEndian>(meta.flags)?;
        entry_bytes.write_all(self.path.as_bytes())?;

        // NUL terminator plus padding
        entry_bytes.resize(Self::padded_len(self.path.len()), 0);

        Ok(Bytes::from(entry_bytes))
    }
}

/// Sequential decoder over the entry area of an index file
///
/// Each step consumes exactly one padded entry; running out of bytes mid-entry
/// yields a `TruncatedIndex` error and ends the iteration.
#[derive(Debug, new)]
pub struct EntryCursor<'a> {
    remaining: &'a [u8],
}

impl EntryCursor<'_> {
    fn decode_next(&mut self) -> Result<IndexEntry> {
        let data = self.remaining;
        if data.len() < ENTRY_FIXED_SIZE {
            return Err(Error::TruncatedIndex(format!(
                "entry needs at least {ENTRY_FIXED_SIZE} bytes, found {}",
                data.len()
            )));
        }

        let (fixed, tail) = data.split_at(ENTRY_FIXED_SIZE);
        let (metadata, oid) = Self::decode_fixed(fixed)?;

        let path_len = tail
            .iter()
            .position(|&b| b == 0)
            .ok_or_else(|| Error::TruncatedIndex("entry path is not terminated".to_string()))?;
        let path = std::str::from_utf8(&tail[..path_len])
            .map_err(|_| Error::InvalidPath(String::from_utf8_lossy(&tail[..path_len]).into_owned().into()))?
            .to_string();

        let entry_len = IndexEntry::padded_len(path_len);
        if entry_len > data.len() {
            return Err(Error::TruncatedIndex(format!(
                "entry for '{path}' is missing its padding"
            )));
        }
        self.remaining = &data[entry_len..];

        Ok(IndexEntry::new(path, oid, metadata))
    }

    fn decode_fixed(mut block: &[u8]) -> Result<(EntryMetadata, ObjectId)> {
        let ctime = block.read_u32::<byteorder::NetworkEndian>()?;
        let ctime_nsec = block.read_u32::<byteorder::NetworkEndian>()?;
        let mtime = block.read_u32::<byteorder::NetworkEndian>()?;
        let mtime_nsec = block.read_u32::<byteorder::NetworkEndian>()?;
        let dev = block.read_u32::<byteorder::NetworkEndian>()?;
        let ino = block.read_u32::<byteorder::NetworkEndian>()?;
        let mode = EntryMode::from(block.read_u32::<byteorder::NetworkEndian>()?);
        let uid = block.read_u32::<byteorder::NetworkEndian>()?;
        let gid = block.read_u32::<byteorder::NetworkEndian>()?;
        let size = block.read_u32::<byteorder::NetworkEndian>()?;
        let oid = ObjectId::read_h40_from(&mut block)?;
        let flags = block.read_u16::<byteorder::NetworkEndian>()?;

        let metadata = EntryMetadata {
            ctime,
            ctime_nsec,
            mtime,
            mtime_nsec,
            dev,
            ino,
            mode,
            uid,
            gid,
            size,
            flags,
        };

        Ok((metadata, oid))
    }
}

impl Iterator for EntryCursor<'_> {
    type Item = Result<IndexEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining.is_empty() {
            return None;
        }

        let entry = self.decode_next();
        if entry.is_err() {
            self.remaining = &[];
        }

        Some(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn oid() -> ObjectId {
        ObjectId::try_parse("ce013625030ba8dba906f756967f9e9ca394464a").unwrap()
    }

    #[rstest]
    #[case(1, 64)]
    #[case(2, 72)]
    #[case(7, 72)]
    #[case(8, 72)]
    #[case(9, 72)]
    #[case(10, 80)]
    fn padding_always_leaves_a_terminator(#[case] path_len: usize, #[case] expected: usize) {
        let padded = IndexEntry::padded_len(path_len);

        assert_eq!(padded, expected);
        assert_eq!(padded % ENTRY_BLOCK, 0);
        assert!(padded > ENTRY_FIXED_SIZE + path_len);
    }

    #[rstest]
    fn stage_lives_in_the_top_bits(oid: ObjectId) {
        let mut entry = IndexEntry::from_stat("a.txt".into(), oid, EntryMetadata::default());
        assert_eq!(entry.metadata.flags, 5);
        assert_eq!(entry.stage(), 0);

        entry.metadata.flags |= 2 << STAGE_SHIFT;
        assert_eq!(entry.stage(), 2);
    }

    #[rstest]
    fn long_paths_saturate_the_length_bits(oid: ObjectId) {
        let entry = IndexEntry::from_stat("x".repeat(5000), oid, EntryMetadata::default());

        assert_eq!(entry.metadata.flags as usize, MAX_PATH_SIZE);
    }

    #[rstest]
    fn fixed_block_has_documented_offsets(oid: ObjectId) {
        let metadata = EntryMetadata {
            mode: EntryMode::EXECUTABLE,
            size: 6,
            ..Default::default()
        };
        let entry = IndexEntry::from_stat("run.sh".into(), oid, metadata);

        let bytes = entry.serialize().unwrap();
        assert_eq!(&bytes[24..28], &0o100755u32.to_be_bytes());
        assert_eq!(&bytes[36..40], &6u32.to_be_bytes());
        assert_eq!(bytes[40], 0xce);
        assert_eq!(&bytes[60..62], &6u16.to_be_bytes());
        assert_eq!(&bytes[62..68], b"run.sh");
        assert!(bytes[68..].iter().all(|&b| b == 0));
    }

    #[rstest]
    fn cursor_reads_back_consecutive_entries(oid: ObjectId) {
        let first = IndexEntry::from_stat("a".into(), oid.clone(), EntryMetadata::default());
        let second = IndexEntry::from_stat("dir/b.txt".into(), oid, EntryMetadata::default());
        let area = [first.serialize().unwrap(), second.serialize().unwrap()].concat();

        let decoded = EntryCursor::new(&area)
            .collect::<Result<Vec<_>>>()
            .unwrap();
        assert_eq!(decoded, vec![first, second]);
    }

    #[rstest]
    fn cursor_stops_at_a_cut_entry(oid: ObjectId) {
        let entry = IndexEntry::from_stat("a.txt".into(), oid, EntryMetadata::default());
        let bytes = entry.serialize().unwrap();

        let mut cursor = EntryCursor::new(&bytes[..40]);
        assert!(matches!(cursor.next(), Some(Err(Error::TruncatedIndex(_)))));
        assert!(cursor.next().is_none());
    }

    #[rstest]
    fn rejects_paths_with_nul(oid: ObjectId) {
        let entry = IndexEntry::new("a\0b".into(), oid, EntryMetadata::default());

        assert!(matches!(entry.serialize(), Err(Error::InvalidPath(_))));
    }
}
