use crate::areas::repository::{DEFAULT_BRANCH, Repository};
use anyhow::Context;
use std::fs;
use tracing::debug;

impl Repository {
    /// Create the control directory skeleton
    ///
    /// Running it again is harmless: existing objects and `HEAD` are kept. The
    /// index file is not created here; it appears with the first `add`.
    pub fn init(&self) -> anyhow::Result<()> {
        let reinitialized = self.control_path().exists();

        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .git/objects directory")?;

        fs::create_dir_all(self.heads_path())
            .context("Failed to create .git/refs/heads directory")?;

        let head_path = self.head_path();
        if !head_path.exists() {
            fs::write(&head_path, format!("ref: refs/heads/{DEFAULT_BRANCH}\n"))
                .context("Failed to create initial HEAD reference")?;
        }
        debug!(path = %self.control_path().display(), reinitialized, "initialized repository");

        let verb = if reinitialized {
            "Reinitialized existing"
        } else {
            "Initialized empty"
        };
        writeln!(
            self.writer(),
            "{verb} repository in {}",
            self.control_path().display()
        )?;

        Ok(())
    }
}
