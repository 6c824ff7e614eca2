//! Staging area
//!
//! Holds the decoded entries of `.git/index`, keyed and ordered by path and then
//! merge stage, so conflict entries written by git survive a rewrite. The file
//! itself is only created by the first staging write; until then the index is
//! simply empty.
//!
//! Writes never touch the live file in place: the new contents go to a temporary
//! file in the control directory which is then renamed over the old index.

use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::index::{decode, encode};
use crate::errors::{Error, IoResultExt, Result};
use std::collections::BTreeMap;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.git/index`)
    path: Box<Path>,
    /// Tracked files mapped by their `/`-separated path and merge stage
    entries: BTreeMap<(String, u8), IndexEntry>,
    /// Set when the in-memory entries differ from what was loaded
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            entries: BTreeMap::new(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and decode the index file without touching the in-memory state
    ///
    /// A missing file is an empty index.
    pub fn load(&self) -> Result<Vec<IndexEntry>> {
        let data = match std::fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no index file, treating as empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e).at(&self.path),
        };

        let entries = decode(&data)?;
        debug!(path = %self.path.display(), entries = entries.len(), "loaded index");

        Ok(entries)
    }

    /// Replace the in-memory entries with the ones on disk
    pub fn rehydrate(&mut self) -> Result<()> {
        self.entries = self
            .load()?
            .into_iter()
            .map(|entry| ((entry.path.clone(), entry.stage()), entry))
            .collect();
        self.changed = false;

        Ok(())
    }

    /// Stage 0 entry of `path`
    pub fn entry_by_path(&self, path: &str) -> Option<&IndexEntry> {
        self.entries.get(&(path.to_string(), 0))
    }

    /// Entries in path order, conflict stages of one path together
    pub fn entries(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert `entry`, replacing any entry already staged under the same path
    ///
    /// Staging a path also resolves it: its conflict stages are dropped.
    pub fn add(&mut self, entry: IndexEntry) {
        let path = entry.path.clone();
        for stage in (0..=3).filter(|stage| *stage != entry.stage()) {
            if self.entries.remove(&(path.clone(), stage)).is_some() {
                self.changed = true;
            }
        }

        let key = (path, entry.stage());
        if self.entries.get(&key) != Some(&entry) {
            self.changed = true;
        }
        self.entries.insert(key, entry);
    }

    /// Persist the entries if anything was added since the last load or write
    pub fn write_updates(&mut self) -> Result<()> {
        if !self.changed {
            return Ok(());
        }

        let entries = self.entries.values().cloned().collect::<Vec<_>>();
        let data = encode(&entries)?;

        let control_dir = self
            .path
            .parent()
            .ok_or_else(|| Error::InvalidPath(self.path.to_path_buf()))?;

        let mut temp_file = tempfile::Builder::new()
            .prefix("index-")
            .tempfile_in(control_dir)
            .at(control_dir)?;
        temp_file.write_all(&data).at(temp_file.path())?;
        temp_file.as_file().sync_all().at(temp_file.path())?;
        temp_file
            .persist(&self.path)
            .map_err(|e| e.error)
            .at(&self.path)?;

        debug!(path = %self.path.display(), entries = entries.len(), "wrote index");
        self.changed = false;

        Ok(())
    }
}
