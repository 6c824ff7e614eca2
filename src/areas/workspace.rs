use crate::areas::repository::CONTROL_DIR;
use crate::artifacts::index::index_entry::EntryMetadata;
use crate::artifacts::objects::object::RawObject;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::status::inspector::ContentHasher;
use crate::errors::{Error, IoResultExt, Result};
use bytes::Bytes;
use std::path::{Component, MAIN_SEPARATOR_STR, Path, PathBuf};
use walkdir::WalkDir;

/// Turn a root-relative path into the `/`-separated form the index stores
///
/// A literal leading `./` is removed; nothing else about the path changes.
pub fn normalize_path(path: &Path) -> Result<String> {
    let text = path
        .to_str()
        .ok_or_else(|| Error::InvalidPath(path.to_path_buf()))?
        .replace(MAIN_SEPARATOR_STR, "/");

    Ok(match text.strip_prefix("./") {
        Some(stripped) => stripped.to_string(),
        None => text,
    })
}

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Regular files under `root_path` (the whole working tree when `None`)
    ///
    /// Any `.git` directory is skipped together with everything below it. Paths
    /// come back normalized and relative to the working root.
    pub fn list_files(&self, root_path: Option<&Path>) -> Result<Vec<String>> {
        let root_path = match root_path {
            Some(path) => self.path.join(Self::pathspec(path)?),
            None => self.path.to_path_buf(),
        };

        if !root_path.exists() {
            let pathspec = root_path
                .strip_prefix(&self.path)
                .unwrap_or(&root_path)
                .display()
                .to_string();
            return Err(Error::PathspecNotFound(pathspec));
        }

        let mut files = Vec::new();
        let walker = WalkDir::new(&root_path)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || entry.file_name() != CONTROL_DIR);

        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            files.push(self.relative_path(entry.path())?);
        }

        Ok(files)
    }

    /// Lexically cleaned form of a user pathspec
    ///
    /// `.` components are dropped. Absolute paths, `..` and anything naming the
    /// control directory are refused, since the status walk could never list them.
    fn pathspec(path: &Path) -> Result<PathBuf> {
        let mut cleaned = PathBuf::new();

        for component in path.components() {
            match component {
                Component::CurDir => {}
                Component::Normal(name) if name != CONTROL_DIR => cleaned.push(name),
                _ => return Err(Error::InvalidPath(path.to_path_buf())),
            }
        }

        Ok(cleaned)
    }

    fn relative_path(&self, path: &Path) -> Result<String> {
        let relative = path
            .strip_prefix(&self.path)
            .map_err(|_| Error::InvalidPath(path.to_path_buf()))?;

        normalize_path(relative)
    }

    pub fn read_file(&self, file_path: &str) -> Result<Bytes> {
        let file_path = self.full_path(file_path);
        let content = std::fs::read(&file_path).at(&file_path)?;

        Ok(Bytes::from(content))
    }

    pub fn stat_file(&self, file_path: &str) -> Result<EntryMetadata> {
        let file_path = self.full_path(file_path);
        let metadata = std::fs::metadata(&file_path).at(&file_path)?;

        Ok(EntryMetadata::from_stat(&file_path, &metadata))
    }

    fn full_path(&self, file_path: &str) -> PathBuf {
        self.path.join(file_path)
    }
}

impl ContentHasher for Workspace {
    fn content_id(&self, path: &str) -> Result<ObjectId> {
        let content = self.read_file(path)?;

        Ok(RawObject::new(ObjectType::Blob, content).object_id())
    }
}
