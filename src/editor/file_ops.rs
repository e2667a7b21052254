//! File operations: open and save.

use crate::utils::split_lines;
use super::Editor;
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::PathBuf;

impl Editor {
    /// Save to the current file path.
    pub fn cmd_save(&mut self) -> Result<()> {
        let Some(path) = self.file_path.clone() else {
            bail!("No file name. Start gutterpad with a FILE argument to save.");
        };
        self.save_to_path(path)
    }

    /// Write the document (lines joined with `\n`) to `path` and make it the current file.
    pub fn save_to_path(&mut self, path: PathBuf) -> Result<()> {
        let content = self.buffer.text();
        fs::write(&path, &content).with_context(|| format!("Failed writing {}", path.display()))?;
        tracing::info!(path = %path.display(), bytes = content.len(), "saved");
        self.set_status(format!("Saved: {}", path.display()));
        self.file_path = Some(path);
        self.mark_saved();
        Ok(())
    }

    /// Replace the document with the contents of `path`. Cursor and history start over.
    pub fn open_path(&mut self, path: PathBuf) -> Result<()> {
        let s = fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;
        self.buffer.replace_current_content_by(split_lines(&s));
        tracing::info!(path = %path.display(), lines = self.buffer.size(), "opened");
        self.set_status(format!("Opened: {}", path.display()));
        self.file_path = Some(path);
        self.mark_saved();
        Ok(())
    }
}
