use crate::areas::database::Database;
use crate::areas::workspace::Workspace;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::object::RawObject;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::Result;
use bytes::Bytes;

pub type LineSet = Vec<String>;

/// One side of a file comparison
#[derive(Debug, Clone)]
pub struct DiffTarget {
    pub(crate) path: String,
    pub(crate) oid: ObjectId,
    pub(crate) data: Bytes,
}

impl DiffTarget {
    /// Staged content of `entry`, which must name a blob
    pub fn from_index(entry: &IndexEntry, database: &Database) -> Result<Self> {
        let blob = database.load_as(entry.oid.as_ref(), ObjectType::Blob)?;

        Ok(DiffTarget {
            path: entry.path.clone(),
            oid: entry.oid.clone(),
            data: blob.into_content(),
        })
    }

    /// Current content of `path` in the working tree
    pub fn from_file(path: &str, workspace: &Workspace) -> Result<Self> {
        let data = workspace.read_file(path)?;
        let oid = RawObject::new(ObjectType::Blob, data.clone()).object_id();

        Ok(DiffTarget {
            path: path.to_string(),
            oid,
            data,
        })
    }

    /// Content split into lines, each keeping its terminator
    ///
    /// Keeping the `\n` makes a missing final newline or a `\r\n` ending a
    /// visible change rather than an equal line.
    pub fn lines(&self) -> LineSet {
        String::from_utf8_lossy(&self.data)
            .split_inclusive('\n')
            .map(str::to_string)
            .collect()
    }
}
