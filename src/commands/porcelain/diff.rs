use crate::areas::repository::Repository;
use crate::artifacts::diff::diff_algorithm::{DiffAlgorithm, Edit, MyersDiff};
use crate::artifacts::diff::diff_target::DiffTarget;
use crate::artifacts::diff::hunk::Hunk;
use crate::artifacts::status::status_info::Status;
use anyhow::anyhow;
use colored::Colorize;

const FILE_SEPARATOR_WIDTH: usize = 70;
const NO_NEWLINE_MARKER: &str = "\\ No newline at end of file";

impl Repository {
    /// Show how each changed file differs from its staged content
    pub fn diff(&self, context: usize) -> anyhow::Result<()> {
        let status = Status::new(self).initialize()?;

        let mut index = self.index();
        index.rehydrate()?;

        let mut printed_any = false;
        for path in &status.changed {
            let entry = index
                .entry_by_path(path)
                .ok_or_else(|| anyhow!("{path} is not staged"))?;

            let a = DiffTarget::from_index(entry, self.database())?;
            let b = DiffTarget::from_file(path, self.workspace())?;
            let hunks = Self::diff_hunks(&a, &b, context);
            if hunks.is_empty() {
                continue;
            }

            if printed_any {
                writeln!(self.writer(), "{}", "-".repeat(FILE_SEPARATOR_WIDTH))?;
            }
            self.print_diff(&a, &b, &hunks)?;
            printed_any = true;
        }

        Ok(())
    }

    fn diff_hunks(a: &DiffTarget, b: &DiffTarget, context: usize) -> Vec<Hunk<String>> {
        if a.oid == b.oid {
            return Vec::new();
        }

        let (a_lines, b_lines) = (a.lines(), b.lines());
        MyersDiff::new(&a_lines, &b_lines).hunks(context)
    }

    fn print_diff(
        &self,
        a: &DiffTarget,
        b: &DiffTarget,
        hunks: &[Hunk<String>],
    ) -> anyhow::Result<()> {
        writeln!(
            self.writer(),
            "{}",
            format!("--- {} (index)", a.path).bold()
        )?;
        writeln!(
            self.writer(),
            "{}",
            format!("+++ {} (working copy)", b.path).bold()
        )?;

        for hunk in hunks {
            self.print_diff_hunk(hunk)?;
        }

        Ok(())
    }

    fn print_diff_hunk(&self, hunk: &Hunk<String>) -> anyhow::Result<()> {
        writeln!(self.writer(), "{}", hunk.header().cyan())?;

        for edit in hunk.edits() {
            let value = edit.value().as_str();
            let line = format!(
                "{}{}",
                edit.symbol(),
                value.strip_suffix('\n').unwrap_or(value)
            );
            match edit {
                Edit::Delete { .. } => writeln!(self.writer(), "{}", line.red())?,
                Edit::Insert { .. } => writeln!(self.writer(), "{}", line.green())?,
                Edit::Equal { .. } => writeln!(self.writer(), "{line}")?,
            }

            if !value.ends_with('\n') {
                writeln!(self.writer(), "{NO_NEWLINE_MARKER}")?;
            }
        }

        Ok(())
    }
}
