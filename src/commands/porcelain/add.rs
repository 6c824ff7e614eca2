use crate::areas::repository::Repository;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::object_type::ObjectType;
use std::path::Path;
use tracing::debug;

impl Repository {
    /// Stage files and directories given relative to the working root
    ///
    /// Every pathspec is resolved before anything is written, so a missing path
    /// leaves both the object store and the index untouched.
    pub fn add(&self, paths: &[String]) -> anyhow::Result<()> {
        let files = paths
            .iter()
            .map(|path| self.workspace().list_files(Some(Path::new(path))))
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .flatten();

        let mut index = self.index();
        index.rehydrate()?;

        for path in files {
            let data = self.workspace().read_file(&path)?;
            let stat = self.workspace().stat_file(&path)?;

            let blob_id = self.database().hash_object(data, ObjectType::Blob, true)?;
            debug!(%path, %blob_id, "staging file");

            index.add(IndexEntry::from_stat(path, blob_id, stat));
        }

        index.write_updates()?;

        Ok(())
    }
}
