use crate::areas::repository::Repository;

impl Repository {
    pub fn ls_files(&self, stage: bool) -> anyhow::Result<()> {
        let entries = self.index().load()?;

        for entry in entries {
            if stage {
                writeln!(
                    self.writer(),
                    "{} {} {}\t{}",
                    entry.metadata.mode,
                    entry.oid,
                    entry.stage(),
                    entry.path
                )?;
            } else {
                writeln!(self.writer(), "{}", entry.path)?;
            }
        }

        Ok(())
    }
}
