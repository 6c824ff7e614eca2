use crate::artifacts::objects::object::RawObject;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{Error, IoResultExt, Result};
use bytes::Bytes;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tracing::{debug, trace};

/// Minimum number of hex characters accepted when resolving an abbreviated ID
pub const MIN_PREFIX_LENGTH: usize = 2;

/// Loose object store rooted at `.git/objects`
///
/// Objects are write-once: storing an ID that is already present is a no-op.
/// The existence check and the write are not atomic together; two processes
/// storing the same ID race harmlessly since both produce identical bytes.
#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Hash `content` as an object of `kind`, writing it to disk when `persist` is set
    pub fn hash_object(&self, content: Bytes, kind: ObjectType, persist: bool) -> Result<ObjectId> {
        let object = RawObject::new(kind, content);

        if persist {
            self.store(&object)
        } else {
            Ok(object.object_id())
        }
    }

    pub fn store(&self, object: &RawObject) -> Result<ObjectId> {
        let object_id = object.object_id();
        let object_path = self.path.join(object_id.to_path());

        if object_path.exists() {
            trace!(%object_id, "object already stored");
            return Ok(object_id);
        }

        let object_dir = object_path
            .parent()
            .ok_or_else(|| Error::InvalidPath(object_path.clone()))?;
        std::fs::create_dir_all(object_dir).at(object_dir)?;

        self.write_object(&object_path, &object.encode()?)?;
        debug!(%object_id, kind = %object.kind(), size = object.content().len(), "stored object");

        Ok(object_id)
    }

    /// Resolve a hex prefix to the single stored object it names
    pub fn resolve_prefix(&self, prefix: &str) -> Result<ObjectId> {
        if prefix.len() < MIN_PREFIX_LENGTH || !prefix.is_char_boundary(MIN_PREFIX_LENGTH) {
            return Err(Error::InvalidPrefix(prefix.to_string()));
        }

        let prefix = prefix.to_ascii_lowercase();
        let (dir_name, file_prefix) = prefix.split_at(MIN_PREFIX_LENGTH);
        let dir_path = self.path.join(dir_name);

        let bucket = match std::fs::read_dir(&dir_path) {
            Ok(bucket) => bucket,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::NotFound(prefix));
            }
            Err(e) => return Err(e).at(&dir_path),
        };

        let mut matches = Vec::new();
        for entry in bucket {
            let file_name = entry.at(&dir_path)?.file_name();
            let file_name = file_name.to_string_lossy();

            if file_name.starts_with(file_prefix) {
                // temp files and strays are not objects
                if let Ok(oid) = ObjectId::try_parse(format!("{dir_name}{file_name}")) {
                    matches.push(oid);
                }
            }
        }

        match matches.len() {
            0 => Err(Error::NotFound(prefix)),
            1 => Ok(matches.remove(0)),
            count => Err(Error::AmbiguousPrefix { prefix, count }),
        }
    }

    /// Resolve `prefix` and decode the object it names
    pub fn load(&self, prefix: &str) -> Result<RawObject> {
        let object_id = self.resolve_prefix(prefix)?;
        let object_path = self.path.join(object_id.to_path());

        let compressed = std::fs::read(&object_path).at(&object_path)?;
        let object = RawObject::decode(&compressed)?;
        trace!(%object_id, kind = %object.kind(), "loaded object");

        Ok(object)
    }

    /// Load an object and require it to be of `kind`
    pub fn load_as(&self, prefix: &str, kind: ObjectType) -> Result<RawObject> {
        let object = self.load(prefix)?;

        if object.kind() != kind {
            return Err(Error::TypeMismatch {
                expected: kind,
                actual: object.kind(),
            });
        }

        Ok(object)
    }

    fn write_object(&self, object_path: &Path, compressed: &[u8]) -> Result<()> {
        let object_dir = object_path
            .parent()
            .ok_or_else(|| Error::InvalidPath(object_path.to_path_buf()))?;

        // write next to the destination, then rename into place
        let mut temp_file = tempfile::Builder::new()
            .prefix("tmp-obj-")
            .tempfile_in(object_dir)
            .at(object_dir)?;
        temp_file.write_all(compressed).at(temp_file.path())?;
        temp_file
            .persist(object_path)
            .map_err(|e| e.error)
            .at(object_path)?;

        Ok(())
    }
}
