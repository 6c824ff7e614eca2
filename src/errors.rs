//! Error taxonomy
//!
//! Every failure the storage engine can report is a distinct variant so callers can
//! match on the condition instead of parsing messages. The binary wraps these with
//! `anyhow` context at the command boundary.

use crate::artifacts::objects::object_type::ObjectType;
use std::path::{Path, PathBuf};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("object prefix must be at least 2 characters long (got '{0}')")]
    InvalidPrefix(String),

    #[error("object '{0}' not found")]
    NotFound(String),

    #[error("multiple objects ({count}) match prefix '{prefix}'")]
    AmbiguousPrefix { prefix: String, count: usize },

    #[error("expected object type {expected}, got {actual}")]
    TypeMismatch {
        expected: ObjectType,
        actual: ObjectType,
    },

    #[error("corrupt object: {0}")]
    CorruptObject(String),

    #[error("unknown object type '{0}' (expected blob, tree or commit)")]
    UnknownObjectType(String),

    #[error("invalid object ID '{0}'")]
    InvalidObjectId(String),

    #[error("index checksum does not match the value stored on disk")]
    ChecksumMismatch,

    #[error("unsupported index format: {0}")]
    UnsupportedFormat(String),

    #[error("truncated index: {0}")]
    TruncatedIndex(String),

    #[error("unexpected display mode '{0}'")]
    UnexpectedMode(String),

    #[error("invalid path {}", .0.display())]
    InvalidPath(PathBuf),

    #[error("pathspec '{0}' did not match any files")]
    PathspecNotFound(String),

    #[error("unable to access {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Walk(#[from] walkdir::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Attach the offending path to a raw I/O failure.
pub trait IoResultExt<T> {
    fn at(self, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn at(self, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|source| Error::FileAccess {
            path: path.as_ref().to_path_buf(),
            source,
        })
    }
}
