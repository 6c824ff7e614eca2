//! Tree object
//!
//! Trees represent directory snapshots. They hold one entry per file (blob) or
//! sub-directory (tree), in order.
//!
//! ## Format
//!
//! Content: a sequence of `<mode> <name>\0<20-byte-sha1>` records, where the mode
//! is octal without leading zeros.
//!
//! ## Tree Building
//!
//! [`TreeBuilder`] turns the flat, slash-separated paths of the index into nested
//! trees and stores them bottom-up, since a parent needs its children's IDs.

use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::object::{Packable, RawObject, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{Error, Result};
use bytes::Bytes;
use derive_new::new;
use std::collections::BTreeMap;
use std::io::{BufRead, Write};

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct TreeEntry {
    pub mode: EntryMode,
    pub name: String,
    pub oid: ObjectId,
}

impl TreeEntry {
    pub fn object_type(&self) -> ObjectType {
        if self.mode.is_directory() {
            ObjectType::Tree
        } else {
            ObjectType::Blob
        }
    }
}

/// `<mode> <type> <oid>\t<name>`, the pretty-print line of a tree entry
impl std::fmt::Display for TreeEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {}\t{}",
            self.mode,
            self.object_type(),
            self.oid,
            self.name
        )
    }
}

/// Decoded view of a tree object's content
#[derive(Debug, Clone, Default, PartialEq, Eq, new)]
pub struct Tree {
    entries: Vec<TreeEntry>,
}

impl Tree {
    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    pub fn into_object(self) -> Result<RawObject> {
        Ok(RawObject::new(ObjectType::Tree, self.serialize()?))
    }
}

impl Packable for Tree {
    fn serialize(&self) -> Result<Bytes> {
        let mut content = Vec::new();

        for entry in &self.entries {
            write!(content, "{:o} {}", entry.mode.as_u32(), entry.name)?;
            content.push(0);
            entry.oid.write_h40_to(&mut content)?;
        }

        Ok(Bytes::from(content))
    }
}

impl Unpackable for Tree {
    fn deserialize(bytes: &[u8]) -> Result<Self> {
        let mut entries = Vec::new();
        let mut reader = bytes;

        // Reuse scratch buffers to reduce allocs
        let mut mode_bytes = Vec::new();
        let mut name_bytes = Vec::new();

        loop {
            mode_bytes.clear();
            let n = reader.read_until(b' ', &mut mode_bytes)?;
            if n == 0 {
                break;
            }
            if mode_bytes.pop() != Some(b' ') {
                return Err(Error::CorruptObject("unexpected end of tree in mode".into()));
            }
            let mode = std::str::from_utf8(&mode_bytes)
                .map_err(|_| Error::CorruptObject("tree entry mode is not ASCII".into()))?;
            let mode = EntryMode::from_octal_str(mode)?;

            name_bytes.clear();
            reader.read_until(b'\0', &mut name_bytes)?;
            if name_bytes.pop() != Some(b'\0') {
                return Err(Error::CorruptObject("unexpected end of tree in name".into()));
            }
            let name = String::from_utf8(name_bytes.clone())
                .map_err(|_| Error::CorruptObject("tree entry name is not UTF-8".into()))?;

            let oid = ObjectId::read_h40_from(&mut reader).map_err(|_| {
                Error::CorruptObject("unexpected end of tree in object id".into())
            })?;

            entries.push(TreeEntry::new(mode, name, oid));
        }

        Ok(Tree { entries })
    }
}

#[derive(Debug, Clone)]
enum Node {
    File(EntryMode, ObjectId),
    Directory(TreeBuilder),
}

/// Nested directory structure built from index entries
///
/// Keys of sub-directories carry a trailing `/` so that the map iterates in the
/// order git sorts tree entries.
#[derive(Debug, Clone, Default)]
pub struct TreeBuilder {
    nodes: BTreeMap<String, Node>,
}

impl TreeBuilder {
    pub fn build<'e>(entries: impl IntoIterator<Item = &'e IndexEntry>) -> Result<Self> {
        let mut root = Self::default();

        for entry in entries {
            let components = entry.path.split('/').collect::<Vec<_>>();
            if components.iter().any(|component| component.is_empty()) {
                return Err(Error::InvalidPath(entry.path.clone().into()));
            }
            root.add_entry(&components, entry);
        }

        Ok(root)
    }

    fn add_entry(&mut self, components: &[&str], entry: &IndexEntry) {
        match components {
            [] => {}
            [name] => {
                self.nodes.insert(
                    name.to_string(),
                    Node::File(entry.metadata.mode, entry.oid.clone()),
                );
            }
            [parent, rest @ ..] => {
                let key = format!("{parent}/");
                let node = self
                    .nodes
                    .entry(key)
                    .or_insert_with(|| Node::Directory(TreeBuilder::default()));

                if let Node::Directory(tree) = node {
                    tree.add_entry(rest, entry);
                }
            }
        }
    }

    /// Store every tree children-first and return the root tree ID
    pub fn write<F>(&self, store: &mut F) -> Result<ObjectId>
    where
        F: FnMut(RawObject) -> Result<ObjectId>,
    {
        let mut entries = Vec::with_capacity(self.nodes.len());

        for (key, node) in &self.nodes {
            let entry = match node {
                Node::File(mode, oid) => TreeEntry::new(*mode, key.clone(), oid.clone()),
                Node::Directory(tree) => TreeEntry::new(
                    EntryMode::DIRECTORY,
                    key.trim_end_matches('/').to_string(),
                    tree.write(store)?,
                ),
            };
            entries.push(entry);
        }

        store(Tree::new(entries).into_object()?)
    }
}
