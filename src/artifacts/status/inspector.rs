use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::status_info::StatusInfo;
use crate::errors::Result;
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};

/// Source of the current content ID of a working-tree path
pub trait ContentHasher {
    /// Blob ID the file at `path` would get if it were stored now
    fn content_id(&self, path: &str) -> Result<ObjectId>;
}

#[derive(new)]
pub struct Inspector<'h, H> {
    hasher: &'h H,
}

impl<H: ContentHasher> Inspector<'_, H> {
    /// Reconcile the working set against the staged entries
    ///
    /// Only paths present on both sides are hashed; a path is `changed` exactly
    /// when its live content ID differs from the staged one.
    pub fn classify<I, S>(&self, working: I, entries: &[IndexEntry]) -> Result<StatusInfo>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let working = working.into_iter().map(Into::into).collect::<BTreeSet<_>>();
        let staged = entries
            .iter()
            .map(|entry| (entry.path.as_str(), entry))
            .collect::<BTreeMap<_, _>>();

        let mut status = StatusInfo::default();

        for path in &working {
            match staged.get(path.as_str()) {
                Some(entry) => {
                    if self.is_content_changed(path, entry)? {
                        status.changed.push(path.clone());
                    }
                }
                None => status.new.push(path.clone()),
            }
        }

        status.deleted = staged
            .keys()
            .filter(|path| !working.contains(**path))
            .map(|path| path.to_string())
            .collect();

        Ok(status)
    }

    fn is_content_changed(&self, path: &str, entry: &IndexEntry) -> Result<bool> {
        Ok(self.hasher.content_id(path)? != entry.oid)
    }
}
