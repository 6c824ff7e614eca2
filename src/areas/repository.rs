use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::workspace::Workspace;
use crate::errors::{IoResultExt, Result};
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};

/// Control directory at the top of the working tree
pub const CONTROL_DIR: &str = ".git";
pub const OBJECTS_DIR: &str = "objects";
pub const HEADS_DIR: &str = "refs/heads";
pub const INDEX_FILE: &str = "index";
pub const HEAD_FILE: &str = "HEAD";
pub const DEFAULT_BRANCH: &str = "master";

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: RefCell<Index>,
    database: Database,
    workspace: Workspace,
}

impl Repository {
    /// Open the repository rooted at `path`, creating the directory if needed
    pub fn new(path: &Path, writer: Box<dyn std::io::Write>) -> Result<Self> {
        if !path.exists() {
            std::fs::create_dir_all(path).at(path)?;
        }
        let path = path.canonicalize().at(path)?;
        let control_path = path.join(CONTROL_DIR);

        let index = Index::new(control_path.join(INDEX_FILE).into_boxed_path());
        let database = Database::new(control_path.join(OBJECTS_DIR).into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            index: RefCell::new(index),
            database,
            workspace,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn control_path(&self) -> PathBuf {
        self.path.join(CONTROL_DIR)
    }

    pub fn heads_path(&self) -> PathBuf {
        self.control_path().join(HEADS_DIR)
    }

    pub fn head_path(&self) -> PathBuf {
        self.control_path().join(HEAD_FILE)
    }

    pub fn writer(&self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&self) -> RefMut<'_, Index> {
        self.index.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }
}
