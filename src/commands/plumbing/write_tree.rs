use crate::areas::repository::Repository;
use crate::artifacts::objects::tree::TreeBuilder;
use tracing::debug;

impl Repository {
    /// Snapshot the index as nested tree objects and print the root tree ID
    pub fn write_tree(&self) -> anyhow::Result<()> {
        let entries = self.index().load()?;

        let builder = TreeBuilder::build(&entries)?;
        let root_id = builder.write(&mut |tree| self.database().store(&tree))?;
        debug!(%root_id, entries = entries.len(), "wrote tree");

        writeln!(self.writer(), "{root_id}")?;

        Ok(())
    }
}
