use crate::areas::repository::Repository;
use crate::artifacts::status::status_info::Status;
use colored::Colorize;

impl Repository {
    /// Print changed, new and deleted paths, one section after the other
    pub fn status(&self) -> anyhow::Result<()> {
        let status = Status::new(self).initialize()?;

        for path in &status.changed {
            writeln!(self.writer(), "{} {}", "M".red(), path)?;
        }

        for path in &status.new {
            writeln!(self.writer(), "{} {}", "??".red(), path)?;
        }

        for path in &status.deleted {
            writeln!(self.writer(), "{} {}", "D".red(), path)?;
        }

        Ok(())
    }
}
