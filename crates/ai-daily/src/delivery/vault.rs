//! Report file output into a notes vault directory.

use std::path::{Path, PathBuf};

use crate::error::Result;

/// File name of the report for `date` (`YYYY-MM-DD`).
pub fn report_filename(date: &str) -> String {
    format!("AI日报-{date}.md")
}

/// Writes reports as Markdown files.
pub struct VaultWriter {
    dir: PathBuf,
}

impl VaultWriter {
    /// Create a writer for the given directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Write the report, creating the directory if needed. A report for the
    /// same date is overwritten.
    pub fn write(&self, markdown: &str, date: &str) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;

        let path = self.dir.join(report_filename(date));
        std::fs::write(&path, markdown)?;

        Ok(path)
    }
}

/// Save the report into the vault. Returns `false` and logs on failure.
pub fn save_to_vault(vault_path: &Path, markdown: &str, date: &str) -> bool {
    match VaultWriter::new(vault_path).write(markdown, date) {
        Ok(path) => {
            tracing::info!(path = %path.display(), "Saved report to vault");
            true
        }
        Err(e) => {
            tracing::error!(path = %vault_path.display(), error = %e, "Failed to save report to vault");
            false
        }
    }
}
