use crate::areas::repository::Repository;
use crate::artifacts::status::inspector::Inspector;
use crate::errors::Result;
use derive_new::new;
use tracing::debug;

/// Working tree compared with the index, each list sorted by path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusInfo {
    /// Tracked paths whose content no longer matches the staged blob
    pub changed: Vec<String>,
    /// Paths present only in the working tree
    pub new: Vec<String>,
    /// Paths present only in the index
    pub deleted: Vec<String>,
}

impl StatusInfo {
    pub fn is_clean(&self) -> bool {
        self.changed.is_empty() && self.new.is_empty() && self.deleted.is_empty()
    }
}

#[derive(new)]
pub struct Status<'r> {
    repository: &'r Repository,
}

impl Status<'_> {
    pub fn initialize(&self) -> Result<StatusInfo> {
        let workspace = self.repository.workspace();
        let working = workspace.list_files(None)?;
        let entries = self.repository.index().load()?;

        let status = Inspector::new(workspace).classify(working, &entries)?;
        debug!(
            changed = status.changed.len(),
            new = status.new.len(),
            deleted = status.deleted.len(),
            "computed status"
        );

        Ok(status)
    }
}
